//! Field report error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldsError {
    #[error("Document {0} has no 'entries' list")]
    MissingEntries(String),

    #[error("Failed to parse document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FieldsResult<T> = Result<T, FieldsError>;
