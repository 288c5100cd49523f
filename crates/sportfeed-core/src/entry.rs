//! Entries appended to the daily log document.
//!
//! Every captured event becomes one `LogEntry`, serialized with a `type`
//! tag (`api_data`, `api_error` or `summary`). Entries are immutable once
//! appended; their order in the document is the order of capture.

use crate::endpoint::EndpointName;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status recorded on `api_data` / `api_error` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Success,
    Error,
}

/// Per-endpoint outcome of one fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    /// Envelope received and recorded.
    Success,
    /// The API client reported an error.
    Failed,
    /// Something other than the API client failed.
    Error,
}

impl FetchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStatus::Success => "success",
            FetchStatus::Failed => "failed",
            FetchStatus::Error => "error",
        }
    }
}

/// Outcome of a single endpoint inside a `summary` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointResult {
    pub status: FetchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub records: usize,
}

impl EndpointResult {
    pub fn success(records: usize) -> Self {
        Self {
            status: FetchStatus::Success,
            error: None,
            records,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: FetchStatus::Failed,
            error: Some(error.into()),
            records: 0,
        }
    }

    pub fn unexpected(error: impl Into<String>) -> Self {
        Self {
            status: FetchStatus::Error,
            error: Some(error.into()),
            records: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == FetchStatus::Success
    }
}

/// Per-endpoint results of a fetch cycle, kept in fetch order.
///
/// Serialized as a JSON object keyed by endpoint name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchResults {
    entries: Vec<(EndpointName, EndpointResult)>,
}

impl FetchResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result for `endpoint`, replacing an earlier one in place.
    pub fn insert(&mut self, endpoint: EndpointName, result: EndpointResult) {
        match self.entries.iter_mut().find(|(name, _)| *name == endpoint) {
            Some(slot) => slot.1 = result,
            None => self.entries.push((endpoint, result)),
        }
    }

    pub fn get(&self, endpoint: EndpointName) -> Option<&EndpointResult> {
        self.entries
            .iter()
            .find(|(name, _)| *name == endpoint)
            .map(|(_, result)| result)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EndpointName, &EndpointResult)> {
        self.entries.iter().map(|(name, result)| (*name, result))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn successful(&self) -> usize {
        self.entries.iter().filter(|(_, r)| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.successful()
    }

    pub fn total_records(&self) -> usize {
        self.entries.iter().map(|(_, r)| r.records).sum()
    }
}

impl Serialize for FetchResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, result) in &self.entries {
            map.serialize_entry(name.as_str(), result)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FetchResults {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // serde_json is built with preserve_order, so the map keeps fetch order.
        let raw = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        let mut results = FetchResults::new();
        for (key, value) in raw {
            let name: EndpointName = key.parse().map_err(de::Error::custom)?;
            let result: EndpointResult =
                serde_json::from_value(value).map_err(de::Error::custom)?;
            results.insert(name, result);
        }
        Ok(results)
    }
}

/// A single entry of the daily log document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEntry {
    /// Successful response, stored with the full envelope.
    ApiData {
        timestamp: String,
        endpoint: EndpointName,
        url: String,
        records_count: usize,
        status: EntryStatus,
        data: Value,
    },
    /// Failed request or rejected envelope.
    ApiError {
        timestamp: String,
        endpoint: EndpointName,
        url: String,
        status: EntryStatus,
        error: String,
    },
    /// Aggregate of one full fetch cycle.
    Summary {
        timestamp: String,
        total_endpoints: usize,
        successful: usize,
        failed: usize,
        total_records: usize,
        results: FetchResults,
    },
}

impl LogEntry {
    pub fn api_data(
        timestamp: String,
        endpoint: EndpointName,
        url: impl Into<String>,
        envelope: Value,
    ) -> Self {
        Self::ApiData {
            timestamp,
            endpoint,
            url: url.into(),
            records_count: records_count(&envelope),
            status: EntryStatus::Success,
            data: envelope,
        }
    }

    pub fn api_error(
        timestamp: String,
        endpoint: EndpointName,
        url: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self::ApiError {
            timestamp,
            endpoint,
            url: url.into(),
            status: EntryStatus::Error,
            error: error.into(),
        }
    }

    pub fn summary(timestamp: String, results: FetchResults) -> Self {
        Self::Summary {
            timestamp,
            total_endpoints: results.len(),
            successful: results.successful(),
            failed: results.failed(),
            total_records: results.total_records(),
            results,
        }
    }

    /// Value of the `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ApiData { .. } => "api_data",
            Self::ApiError { .. } => "api_error",
            Self::Summary { .. } => "summary",
        }
    }
}

/// Number of records in an envelope's `results` member.
pub fn records_count(envelope: &Value) -> usize {
    match envelope.get("results") {
        Some(Value::Array(items)) => items.len(),
        Some(Value::Object(fields)) => fields.len(),
        _ => 0,
    }
}
