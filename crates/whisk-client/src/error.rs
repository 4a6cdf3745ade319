use crate::messages;

/// Request-shaping failures raised before anything reaches the transport
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{}", messages::MISSING_ACTION_OR_SEQ_BODY_ERROR)]
    MissingActionBody,

    #[error("{}", messages::INVALID_ACTION_AND_SEQ_PARAMETERS)]
    ConflictingActionBody,

    #[error("{}", messages::INVALID_SEQ_PARAMETER)]
    InvalidSequenceType,

    #[error("{}", messages::INVALID_SEQ_PARAMETER_LENGTH)]
    InvalidSequenceLength,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("{}", messages::MISSING_NAME_ERROR)]
    MissingIdentifier,

    #[error("Invalid resource identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl ClientError {
    /// HTTP status for API failures, `None` for everything raised locally
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
