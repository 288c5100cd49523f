//! Per-endpoint field report over a daily document.

use crate::error::{FieldsError, FieldsResult};
use crate::extract::extract_fields;
use serde_json::Value;
use sportfeed_persistence::LogDocument;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Endpoint label for `api_data` entries without an `endpoint` field.
pub const UNKNOWN_ENDPOINT: &str = "unknown";

/// Number of fields shown in the console summary.
pub const CONSOLE_SAMPLE_SIZE: usize = 20;

const API_DATA: &str = "api_data";
const PROGRESS_EVERY: usize = 50;
const RULE: &str = "============================================================";
const SUB_RULE: &str = "----------------------------------------";

/// Field paths seen in the `api_data` entries of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldReport {
    by_endpoint: BTreeMap<String, BTreeSet<String>>,
    all_fields: BTreeSet<String>,
    entries_processed: usize,
}

impl FieldReport {
    /// Read and analyze a daily document on disk.
    pub fn load(path: &Path) -> FieldsResult<Self> {
        let content = fs::read_to_string(path)?;
        let document: Value = serde_json::from_str(&content)?;

        let entries = document
            .get("entries")
            .and_then(Value::as_array)
            .ok_or_else(|| FieldsError::MissingEntries(path.display().to_string()))?;

        info!(file = %path.display(), entries = entries.len(), "Loaded daily document");
        Ok(Self::from_entries(entries))
    }

    pub fn from_document(document: &LogDocument) -> Self {
        Self::from_entries(&document.entries)
    }

    /// Accumulate fields from every `api_data` entry with non-empty `data`.
    pub fn from_entries(entries: &[Value]) -> Self {
        let mut report = Self::default();

        for entry in entries {
            if entry.get("type").and_then(Value::as_str) != Some(API_DATA) {
                continue;
            }
            let Some(data) = entry.get("data").filter(|data| has_content(data)) else {
                continue;
            };

            let endpoint = entry
                .get("endpoint")
                .and_then(Value::as_str)
                .unwrap_or(UNKNOWN_ENDPOINT);
            report.add(endpoint, extract_fields(data));

            if report.entries_processed % PROGRESS_EVERY == 0 {
                debug!(processed = report.entries_processed, "Processed API entries");
            }
        }

        report
    }

    fn add(&mut self, endpoint: &str, fields: BTreeSet<String>) {
        self.all_fields.extend(fields.iter().cloned());
        self.by_endpoint
            .entry(endpoint.to_string())
            .or_default()
            .extend(fields);
        self.entries_processed += 1;
    }

    /// Fields per endpoint, keyed by endpoint name.
    pub fn by_endpoint(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.by_endpoint
    }

    pub fn endpoint_fields(&self, endpoint: &str) -> Option<&BTreeSet<String>> {
        self.by_endpoint.get(endpoint)
    }

    /// Union of all endpoints' fields.
    pub fn all_fields(&self) -> &BTreeSet<String> {
        &self.all_fields
    }

    pub fn entries_processed(&self) -> usize {
        self.entries_processed
    }

    pub fn endpoint_count(&self) -> usize {
        self.by_endpoint.len()
    }

    /// Full report, one line per item, for the log.
    pub fn detailed_lines(&self) -> Vec<String> {
        let mut lines = vec!["FIELDS BY ENDPOINT:".to_string(), RULE.to_string()];

        for (endpoint, fields) in &self.by_endpoint {
            lines.push(String::new());
            lines.push(format!(
                "{} ENDPOINT ({} fields):",
                endpoint.to_uppercase(),
                fields.len()
            ));
            lines.push(SUB_RULE.to_string());
            lines.extend(fields.iter().map(|field| format!("  • {field}")));
        }

        lines.push(String::new());
        lines.push("SUMMARY:".to_string());
        lines.push(RULE.to_string());
        lines.push(format!("Total endpoints analyzed: {}", self.endpoint_count()));
        lines.push(format!("Total unique fields: {}", self.all_fields.len()));
        lines.push(format!("Entries processed: {}", self.entries_processed));

        lines.push(String::new());
        lines.push("ALL UNIQUE FIELDS:".to_string());
        lines.push(RULE.to_string());
        lines.extend(self.all_fields.iter().map(|field| format!("  • {field}")));

        lines
    }

    /// Short summary with a sample of the first fields, for the terminal.
    pub fn console_summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Found {} unique fields across {} endpoints",
            self.all_fields.len(),
            self.endpoint_count()
        );

        if !self.all_fields.is_empty() {
            let _ = writeln!(out, "\nSample of fields found:");
            for field in self.all_fields.iter().take(CONSOLE_SAMPLE_SIZE) {
                let _ = writeln!(out, "  • {field}");
            }
            if self.all_fields.len() > CONSOLE_SAMPLE_SIZE {
                let _ = writeln!(
                    out,
                    "  ... and {} more fields",
                    self.all_fields.len() - CONSOLE_SAMPLE_SIZE
                );
            }
        }

        out
    }
}

/// JSON truthiness: null, false, zero and empty containers carry nothing.
fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(members) => !members.is_empty(),
    }
}
