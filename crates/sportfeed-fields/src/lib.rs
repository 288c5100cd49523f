//! Field inventory of captured sportfeed payloads.
//!
//! Walks the `api_data` entries of a daily document and lists every JSON
//! field path seen, per endpoint and overall.

pub mod error;
pub mod extract;
pub mod report;

pub use error::{FieldsError, FieldsResult};
pub use extract::extract_fields;
pub use report::{FieldReport, CONSOLE_SAMPLE_SIZE, UNKNOWN_ENDPOINT};
