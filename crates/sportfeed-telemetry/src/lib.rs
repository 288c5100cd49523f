//! Structured logging for sportfeed.
//!
//! Log lines carry US Eastern wall-clock timestamps so they line up with the
//! dates of the daily data files.

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{init_logging, EasternTimer, LoggingConfig, EASTERN_LOG_FORMAT};
