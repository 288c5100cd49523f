//! Core domain types for the sportfeed data collector.
//!
//! This crate provides the types shared by the API client, the daily log
//! store and the driver:
//! - `EndpointName`, `EndpointRegistry`: the fixed set of signed endpoints
//! - `LogEntry`: tagged entries appended to the daily document
//! - `Clock`: wall-clock source, rendered in US Eastern time

pub mod clock;
pub mod endpoint;
pub mod entry;
pub mod error;

pub use clock::{
    file_date_suffix, iso_timestamp, Clock, ManualClock, SharedClock, SystemClock, EASTERN,
};
pub use endpoint::{EndpointName, EndpointRegistry, DEFAULT_BASE_URL};
pub use entry::{
    records_count, EndpointResult, EntryStatus, FetchResults, FetchStatus, LogEntry,
};
pub use error::{CoreError, Result};
