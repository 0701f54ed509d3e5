//! Error types for steermock

use thiserror::Error;

/// Main error type for steermock operations
#[derive(Error, Debug)]
pub enum SteerError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Relay/HTTP errors
    #[error("Relay error: {0}")]
    Relay(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for steermock operations
pub type Result<T> = std::result::Result<T, SteerError>;
