//! Sportfeed collector.
//!
//! Fetches every configured football endpoint once per run and records the
//! envelopes, errors and a cycle summary in the daily log document.

pub mod app;
pub mod config;
pub mod error;

pub use app::{Application, CycleReport};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
