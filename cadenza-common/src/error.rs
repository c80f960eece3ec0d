//! Common error types for Cadenza

use thiserror::Error;

/// Common result type for Cadenza operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Cadenza services
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration or data file loading error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A required identifier was omitted from the request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
