// src/error.rs
// Standardized error types for Pulse

use thiserror::Error;

/// Main error type for the Pulse library
#[derive(Error, Debug)]
pub enum PulseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown error: {0}")]
    Other(String),
}

/// Convenience type alias for Result using PulseError
pub type Result<T> = std::result::Result<T, PulseError>;

impl From<String> for PulseError {
    fn from(s: String) -> Self {
        PulseError::Other(s)
    }
}
