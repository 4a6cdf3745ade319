//! Utility functions for the CLI

use crate::error::{CliError, CliResult};
use colored::{ColoredString, Colorize};
use serde_json::Value as JsonValue;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize tracing with proper filtering
pub fn init_tracing() -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CliError::General(format!("Failed to set tracing subscriber: {}", e)))?;

    Ok(())
}

/// Utility for colored console output
pub struct ColoredOutput;

impl ColoredOutput {
    pub fn success(msg: &str) -> ColoredString {
        msg.green().bold()
    }

    pub fn error(msg: &str) -> ColoredString {
        msg.red().bold()
    }

    pub fn highlight(msg: &str) -> ColoredString {
        msg.cyan().bold()
    }
}

/// Parse `KEY=VALUE`; the value is read as JSON when it parses, otherwise kept as a string
pub fn parse_key_value(raw: &str) -> CliResult<(String, JsonValue)> {
    let (key, value) = raw.split_once('=').ok_or_else(|| {
        CliError::InvalidArgument(format!("Expected KEY=VALUE, got '{}'", raw))
    })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidArgument(format!(
            "Empty key in '{}'",
            raw
        )));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| JsonValue::String(value.to_string()));
    Ok((key.to_string(), value))
}

pub fn is_binary_artifact(path: &str) -> bool {
    let lower = path.to_lowercase();
    lower.ends_with(".zip") || lower.ends_with(".jar")
}

/// Validate file exists and is readable
pub fn validate_file_exists(path: &str) -> CliResult<()> {
    if !std::path::Path::new(path).exists() {
        return Err(CliError::FileNotFound(path.to_string()));
    }
    Ok(())
}

pub fn format_json(value: &JsonValue, compact: bool) -> CliResult<String> {
    Ok(if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    })
}
