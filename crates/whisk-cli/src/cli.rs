//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "wsk-actions",
    about = "Manage and invoke serverless actions",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Platform API host
    #[arg(long, env = "__OW_API_HOST")]
    pub api_host: Option<String>,

    /// Credentials in user:password form
    #[arg(long = "auth", env = "__OW_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Default namespace
    #[arg(long, short = 'n', env = "__OW_NAMESPACE")]
    pub namespace: Option<String>,

    /// Accept self-signed certificates
    #[arg(long = "insecure", short = 'i')]
    pub insecure: bool,

    /// Request timeout in milliseconds
    #[arg(long, env = "WHISK_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Compact JSON output
    #[arg(long)]
    pub compact: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List actions
    List {
        #[arg(long)]
        skip: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
        /// Return only the number of actions
        #[arg(long)]
        count: bool,
    },

    /// Get an action
    Get {
        name: String,
        /// Whether to include the action code (true/false)
        #[arg(long)]
        code: Option<bool>,
    },

    /// Invoke an action
    Invoke {
        name: String,
        /// Parameter as KEY=VALUE, VALUE parsed as JSON when possible
        #[arg(long = "param", short = 'p')]
        params: Vec<String>,
        /// Wait for the activation to complete
        #[arg(long, short = 'b')]
        blocking: bool,
        /// Print only the action result (implies --blocking)
        #[arg(long, short = 'r')]
        result: bool,
    },

    /// Create an action
    Create {
        #[command(flatten)]
        args: ActionArgs,
    },

    /// Create or replace an action
    Update {
        #[command(flatten)]
        args: ActionArgs,
    },

    /// Delete an action
    Delete { name: String },
}

#[derive(Args, Debug, Clone)]
pub struct ActionArgs {
    /// Action name, optionally `/namespace/[package/]name`
    pub name: String,

    /// Source file; `.zip` and `.jar` files are uploaded as binary
    #[arg(conflicts_with = "sequence")]
    pub artifact: Option<String>,

    /// Runtime kind, e.g. `python:3`
    #[arg(long)]
    pub kind: Option<String>,

    /// Entry point function
    #[arg(long)]
    pub main: Option<String>,

    /// Comma-separated component actions
    #[arg(long, value_delimiter = ',')]
    pub sequence: Option<Vec<String>>,

    /// Default parameter as KEY=VALUE
    #[arg(long = "param", short = 'p')]
    pub params: Vec<String>,

    /// Annotation as KEY=VALUE
    #[arg(long = "annotation", short = 'a')]
    pub annotations: Vec<String>,

    /// Action version
    #[arg(long = "action-version")]
    pub action_version: Option<String>,

    /// Timeout limit in milliseconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Memory limit in MB
    #[arg(long)]
    pub memory: Option<u64>,

    /// Log size limit in MB
    #[arg(long)]
    pub logsize: Option<u64>,

    /// Print the request body instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}
