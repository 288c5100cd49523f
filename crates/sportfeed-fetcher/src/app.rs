//! Fetch cycle orchestration.
//!
//! One cycle visits every registered endpoint in order, records each
//! envelope or error in the daily document and finishes with a summary
//! entry. Endpoint failures never abort the cycle; only a store failure
//! while recording an error does.

use crate::config::AppConfig;
use crate::error::AppResult;
use sportfeed_api::{ApiClient, ClientConfig};
use sportfeed_core::{
    iso_timestamp, records_count, EndpointName, EndpointResult, FetchResults, LogEntry,
    SharedClock,
};
use sportfeed_persistence::DailyLogStore;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

const SUMMARY_RULE: &str = "============================================================";

/// Outcome of one fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// Per-endpoint results, in fetch order.
    pub results: FetchResults,
    /// Daily document the cycle wrote to.
    pub file: PathBuf,
}

impl CycleReport {
    pub fn successful(&self) -> usize {
        self.results.successful()
    }

    pub fn failed(&self) -> usize {
        self.results.failed()
    }

    pub fn total_records(&self) -> usize {
        self.results.total_records()
    }
}

/// Main application.
pub struct Application {
    client: ApiClient,
    store: DailyLogStore,
    clock: SharedClock,
    /// Pause after each successful fetch.
    request_delay: Duration,
}

impl Application {
    /// Create a new application.
    pub fn new(config: &AppConfig, clock: SharedClock) -> AppResult<Self> {
        let client = ApiClient::new(
            config.api.registry(),
            config.api.credentials(),
            ClientConfig {
                timeout: config.api.timeout(),
                retry: config.api.retry.clone(),
            },
            clock.clone(),
        )?;
        let store = DailyLogStore::new(
            &config.storage.data_dir,
            &config.storage.file_prefix,
            clock.clone(),
        );

        Ok(Self {
            client,
            store,
            clock,
            request_delay: config.api.request_delay(),
        })
    }

    pub fn store(&self) -> &DailyLogStore {
        &self.store
    }

    /// Fetch every endpoint once and record the results.
    pub async fn run_cycle(&self) -> AppResult<CycleReport> {
        info!(
            user = %self.client.user(),
            endpoints = self.client.registry().len(),
            file = %self.store.current_filename(),
            "Starting data collection"
        );

        let mut results = FetchResults::new();
        for (endpoint, url) in self.client.registry().iter() {
            let result = self.fetch_endpoint(endpoint, url).await?;
            results.insert(endpoint, result);
        }

        self.log_summary(&results);
        self.store
            .append(&LogEntry::summary(self.timestamp(), results.clone()))?;

        let file = self.store.current_path();
        info!(file = %file.display(), "Data collection completed");

        Ok(CycleReport { results, file })
    }

    async fn fetch_endpoint(&self, endpoint: EndpointName, url: &str) -> AppResult<EndpointResult> {
        info!(endpoint = %endpoint, "Fetching endpoint");

        let envelope = match self.client.fetch(endpoint).await {
            Ok(envelope) => envelope,
            Err(e) => {
                let message = e.to_string();
                error!(endpoint = %endpoint, error = %message, "Endpoint failed");
                self.record_error(endpoint, url, &message)?;
                return Ok(EndpointResult::failed(message));
            }
        };

        let records = records_count(&envelope);
        let entry = LogEntry::api_data(self.timestamp(), endpoint, url, envelope);

        if let Err(e) = self.store.append(&entry) {
            let message = format!("Unexpected error: {e}");
            error!(endpoint = %endpoint, error = %message, "Failed to record envelope");
            self.record_error(endpoint, url, &message)?;
            return Ok(EndpointResult::unexpected(message));
        }

        info!(endpoint = %endpoint, records, "Endpoint fetched");

        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        Ok(EndpointResult::success(records))
    }

    fn record_error(&self, endpoint: EndpointName, url: &str, message: &str) -> AppResult<()> {
        let entry = LogEntry::api_error(self.timestamp(), endpoint, url, message);
        self.store.append(&entry)?;
        Ok(())
    }

    fn log_summary(&self, results: &FetchResults) {
        info!("{SUMMARY_RULE}");
        info!("FETCH SUMMARY");
        info!("{SUMMARY_RULE}");
        info!(
            total_endpoints = results.len(),
            successful = results.successful(),
            failed = results.failed(),
            total_records = results.total_records(),
            "Cycle totals"
        );

        for (endpoint, result) in results.iter() {
            info!(
                "{:12} | {:12} | {:6} records",
                endpoint.as_str(),
                result.status.as_str(),
                result.records
            );
            if let Some(message) = &result.error {
                error!("    Error: {message}");
            }
        }
    }

    fn timestamp(&self) -> String {
        iso_timestamp(&self.clock.eastern_now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sportfeed_core::{ManualClock, SystemClock};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn offline_config(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        // Nothing listens on port 1.
        config.api.base_url = "http://127.0.0.1:1".to_string();
        config.api.timeout_secs = 2;
        config.api.request_delay_ms = 0;
        config.storage.data_dir = dir.path().to_path_buf();
        config
    }

    #[test]
    fn test_cycle_report_totals() {
        let mut results = FetchResults::new();
        results.insert(EndpointName::Live, EndpointResult::success(4));
        results.insert(EndpointName::Odds, EndpointResult::failed("Resource does not exist"));
        results.insert(EndpointName::Team, EndpointResult::unexpected("Unexpected error: disk"));

        let report = CycleReport {
            results,
            file: PathBuf::from("json_fetch_data_2025-01-15.json"),
        };
        assert_eq!(report.successful(), 1);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.total_records(), 4);
    }

    #[tokio::test]
    async fn test_unreachable_api_records_every_endpoint_as_failed() {
        let temp_dir = TempDir::new().unwrap();
        let config = offline_config(&temp_dir);
        let app = Application::new(&config, Arc::new(SystemClock)).unwrap();

        let report = app.run_cycle().await.unwrap();

        assert_eq!(report.results.len(), 6);
        assert_eq!(report.failed(), 6);
        assert!(report
            .results
            .iter()
            .all(|(_, r)| r.error.as_deref().unwrap_or("").starts_with("Request failed: ")));

        // six api_error entries plus the summary
        let doc = app.store().read_current().unwrap();
        assert_eq!(doc.entries_of_type("api_error").count(), 6);
        assert_eq!(doc.entries_of_type("summary").count(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_while_recording_error_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not_a_dir");
        std::fs::write(&blocker, "x").unwrap();

        let mut config = offline_config(&temp_dir);
        config.api.endpoints = vec![EndpointName::Country];
        config.storage.data_dir = blocker;

        let clock = Arc::new(ManualClock::new(chrono::Utc::now()));
        let app = Application::new(&config, clock).unwrap();

        let err = app.run_cycle().await.unwrap_err();
        assert!(matches!(err, crate::error::AppError::Persistence(_)));
    }
}
