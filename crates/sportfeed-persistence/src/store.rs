//! Daily log store.
//!
//! File layout inside the store directory:
//! - `{prefix}_{YYYY-MM-DD}.json`: the live document for that Eastern day
//! - `archive_{prefix}_{YYYY-MM-DD}.json`: documents of earlier days
//!
//! Rotation is lazy: it happens on the first append after midnight Eastern,
//! not on a timer. Appends rewrite the whole document, so each append costs
//! O(document size). Only one process may append at a time; there is no
//! file locking.

use crate::document::LogDocument;
use crate::error::{PersistenceError, PersistenceResult};
use serde::Serialize;
use sportfeed_core::{file_date_suffix, iso_timestamp, SharedClock};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default daily file prefix.
pub const DEFAULT_FILE_PREFIX: &str = "json_fetch_data";

/// Prefix added to a daily file when it is archived.
pub const ARCHIVE_PREFIX: &str = "archive_";

/// File name of the daily document for `date`.
pub fn daily_filename(prefix: &str, date: &str) -> String {
    format!("{prefix}_{date}.json")
}

fn is_daily_file(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('_'))
        .map(|rest| rest.ends_with(".json"))
        .unwrap_or(false)
}

/// Read and decode a daily document.
///
/// A document that cannot be decoded is reported as `CorruptDocument`; no
/// repair is attempted.
pub fn load_document(path: &Path) -> PersistenceResult<LogDocument> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| PersistenceError::CorruptDocument {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Write `doc` to `path`, replacing the previous content.
fn write_document(path: &Path, doc: &LogDocument) -> PersistenceResult<()> {
    let content = serde_json::to_string_pretty(doc)?;
    fs::write(path, content)?;
    Ok(())
}

/// Latest (by date in the name) daily document in `dir`.
pub fn find_latest(dir: &Path, prefix: &str) -> PersistenceResult<PathBuf> {
    let mut names: Vec<String> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if let Some(name) = entry.file_name().to_str() {
            if is_daily_file(name, prefix) {
                names.push(name.to_string());
            }
        }
    }

    names.sort();
    names
        .pop()
        .map(|name| dir.join(name))
        .ok_or_else(|| PersistenceError::NoDailyFile {
            dir: dir.display().to_string(),
            prefix: prefix.to_string(),
        })
}

/// Store owning the live daily document.
pub struct DailyLogStore {
    /// Directory holding live and archived documents.
    dir: PathBuf,
    /// File name prefix (e.g. `json_fetch_data`).
    prefix: String,
    clock: SharedClock,
}

impl DailyLogStore {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, clock: SharedClock) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            clock,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Name of today's document. Pure; touches no files.
    pub fn current_filename(&self) -> String {
        let today = file_date_suffix(&self.clock.eastern_now());
        daily_filename(&self.prefix, &today)
    }

    /// Path of today's document.
    pub fn current_path(&self) -> PathBuf {
        self.dir.join(self.current_filename())
    }

    /// Make sure today's document exists, archiving earlier days first.
    ///
    /// Idempotent within a day: once today's file exists this only returns
    /// its path.
    pub fn ensure_rotated(&self) -> PersistenceResult<PathBuf> {
        let filename = self.current_filename();
        let path = self.dir.join(&filename);

        if path.exists() {
            return Ok(path);
        }

        fs::create_dir_all(&self.dir)?;
        let archived = self.archive_previous(&filename)?;

        let now = self.clock.eastern_now();
        let doc = LogDocument::new(file_date_suffix(&now), iso_timestamp(&now));
        write_document(&path, &doc)?;

        info!(file = %filename, archived, "Created daily log document");
        Ok(path)
    }

    /// Move every daily file other than `current` to its archive name.
    fn archive_previous(&self, current: &str) -> PersistenceResult<usize> {
        let mut archived = 0;

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if name == current || !is_daily_file(name, &self.prefix) {
                continue;
            }
            if !entry.file_type()?.is_file() {
                continue;
            }

            let archive_path = self.dir.join(format!("{ARCHIVE_PREFIX}{name}"));
            if archive_path.exists() {
                fs::remove_file(&archive_path)?;
            }
            fs::rename(entry.path(), &archive_path)?;
            archived += 1;

            info!(from = %name, to = %archive_path.display(), "Archived daily log document");
        }

        Ok(archived)
    }

    /// Append one entry to today's document.
    ///
    /// Reads the whole document, pushes `entry`, stamps `last_updated` and
    /// rewrites the file. Any I/O or decode failure aborts the append.
    pub fn append<T: Serialize>(&self, entry: &T) -> PersistenceResult<()> {
        let path = self.ensure_rotated()?;
        let mut doc = load_document(&path)?;

        doc.entries.push(serde_json::to_value(entry)?);
        doc.last_updated = Some(iso_timestamp(&self.clock.eastern_now()));
        write_document(&path, &doc)?;

        debug!(
            file = %path.display(),
            entries = doc.entries.len(),
            "Appended entry to daily log"
        );
        Ok(())
    }

    /// Decode today's document.
    pub fn read_current(&self) -> PersistenceResult<LogDocument> {
        load_document(&self.current_path())
    }
}
