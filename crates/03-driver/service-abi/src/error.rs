use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by a backend service when a fetch cannot complete.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportError {
    #[error("server responded with status {code}: {message}")]
    Status { code: u16, message: String },

    #[error("response body could not be decoded: {0}")]
    Decode(String),

    #[error("service disconnected")]
    Disconnected,

    #[error("request timed out")]
    Timeout,
}

impl TransportError {
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        TransportError::Status {
            code,
            message: message.into(),
        }
    }

    /// Returns the server-provided message when there is one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            TransportError::Status { message, .. } if !message.is_empty() => Some(message.as_str()),
            _ => None,
        }
    }
}
