//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API client error: {0}")]
    Api(#[from] sportfeed_api::ApiError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] sportfeed_persistence::PersistenceError),
}

pub type AppResult<T> = Result<T, AppError>;
