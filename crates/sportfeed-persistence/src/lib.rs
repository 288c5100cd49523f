//! Daily rotating JSON document store for sportfeed.
//!
//! Keeps exactly one live document per Eastern calendar day. Every append
//! reads the whole document, pushes one entry and rewrites the file, so
//! downstream tools always see a single self-contained JSON document.

pub mod document;
pub mod error;
pub mod store;

pub use document::LogDocument;
pub use error::{PersistenceError, PersistenceResult};
pub use store::{
    daily_filename, find_latest, load_document, DailyLogStore, ARCHIVE_PREFIX,
    DEFAULT_FILE_PREFIX,
};
