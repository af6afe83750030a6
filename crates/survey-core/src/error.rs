//! Error types for the survey client.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Validation failed for {count} field(s)")]
    Validation { count: usize },

    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status, with the backend's own message when it sent one.
    #[error("Backend returned status {status}")]
    Backend { status: u16, message: Option<String> },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid wizard transition: {0}")]
    InvalidTransition(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Text shown to the user: the backend's message verbatim when present,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Backend {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}
