//! Error types for the denoise server.

use thiserror::Error;

/// Error type for server startup and shutdown.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration error (bad bind address, ...).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serving failed after startup.
    #[error("Server error: {0}")]
    Server(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;
