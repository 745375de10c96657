use serde::Serialize;
use thiserror::Error;

/// Coarse classification of a failure, for callers that branch on kind
/// instead of matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Config,
    Network,
    Http,
    Decode,
    Validation,
    Cancelled,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StudioError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Request was superseded")]
    Cancelled,

    #[error("Request task failed: {0}")]
    Internal(String),
}

impl StudioError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StudioError::Config(_) => ErrorKind::Config,
            StudioError::Network(_) => ErrorKind::Network,
            StudioError::Http { .. } => ErrorKind::Http,
            StudioError::Decode(_) => ErrorKind::Decode,
            StudioError::Validation(_) => ErrorKind::Validation,
            StudioError::Cancelled => ErrorKind::Cancelled,
            StudioError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Single line suitable for the error banner of a view.
    pub fn user_message(&self) -> String {
        match self {
            StudioError::Validation(msg) => msg.clone(),
            StudioError::Http { status, .. } => format!("Request failed with status {}", status),
            other => other.to_string(),
        }
    }

    /// Errors produced while the request was still being sent.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StudioError::Decode(err.to_string())
        } else {
            StudioError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(err: serde_json::Error) -> Self {
        StudioError::Decode(err.to_string())
    }
}

impl From<base64::DecodeError> for StudioError {
    fn from(err: base64::DecodeError) -> Self {
        StudioError::Decode(format!("invalid base64 image data: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
