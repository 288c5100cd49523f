//! Persistence error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt daily document {path}: {reason}")]
    CorruptDocument { path: String, reason: String },

    #[error("No daily files with prefix '{prefix}' in {dir}")]
    NoDailyFile { dir: String, prefix: String },
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;
