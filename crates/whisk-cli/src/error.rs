//! Error types for the CLI

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Client(#[from] whisk_client::ClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("General error: {0}")]
    General(String),
}

impl From<whisk_client::ValidationError> for CliError {
    fn from(err: whisk_client::ValidationError) -> Self {
        Self::Client(err.into())
    }
}

pub type CliResult<T> = Result<T, CliError>;
