//! Error types for sportfeed-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid endpoint: {0}")]
    UnknownEndpoint(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
