//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// The `Display` output of every variant is a message fit to show the user
/// as-is. Controllers render it verbatim in error states and toasts.
#[derive(Error, Debug)]
pub enum Error {
    /// No response was received (DNS, connect, TLS, reset...)
    #[error("{0}")]
    Transport(String),

    /// The server answered 401; the session has already been invalidated
    #[error("{0}")]
    Unauthorized(String),

    /// Non-2xx response carrying a `{ "message": ... }` body
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Non-2xx without a readable message, or a 2xx body that did not decode
    #[error("{0}")]
    Malformed(String),

    #[error("{0}")]
    Validation(String),

    /// Local persistence failed; the message is shown as-is
    #[error("{0}")]
    Storage(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn api(status: u16, msg: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: msg.into(),
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Replace the generic message of a `Malformed` error
    ///
    /// The same endpoint can back several screens, each with its own
    /// wording for "the server said no without saying why".
    pub fn with_fallback(self, fallback: &str) -> Self {
        match self {
            Self::Malformed(_) => Self::Malformed(fallback.to_string()),
            other => other,
        }
    }

    /// True when the failure came from a 401 response
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// HTTP status of the rejecting response, when there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(401),
            _ => None,
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
