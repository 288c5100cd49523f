//! Structured logging initialization.

use crate::error::{TelemetryError, TelemetryResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sportfeed_core::EASTERN;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log timestamp layout: `MM/DD/YYYY HH:MM:SS AM/PM`.
pub const EASTERN_LOG_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset. Default: "info".
    #[serde(default = "default_level")]
    pub level: String,
    /// File receiving a copy of every log line, appended to.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Emit JSON lines instead of pretty output.
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            log_file: None,
            json: false,
        }
    }
}

/// Timer rendering event times in US Eastern time.
#[derive(Debug, Clone, Copy, Default)]
pub struct EasternTimer;

impl EasternTimer {
    pub fn render(at: DateTime<Utc>) -> String {
        at.with_timezone(&EASTERN)
            .format(EASTERN_LOG_FORMAT)
            .to_string()
    }
}

impl FormatTime for EasternTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Self::render(Utc::now()))
    }
}

fn open_log_file(path: &Path) -> TelemetryResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| TelemetryError::LogFile {
            path: path.display().to_string(),
            source,
        })
}

/// Initialize structured logging.
///
/// Configures tracing with JSON output for production (`RUST_ENV=production`
/// or `json = true`) and pretty output for development. When a log file is
/// configured every event is also appended there without ANSI colors.
pub fn init_logging(config: &LoggingConfig) -> TelemetryResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    let is_production = std::env::var("RUST_ENV")
        .map(|v| v == "production")
        .unwrap_or(false);

    let file_layer = match &config.log_file {
        Some(path) => Some(
            fmt::layer()
                .with_writer(Mutex::new(open_log_file(path)?))
                .with_ansi(false)
                .with_timer(EasternTimer)
                .with_target(false),
        ),
        None => None,
    };

    let result = if is_production || config.json {
        // JSON format for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(
                fmt::layer()
                    .json()
                    .with_timer(EasternTimer)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()
    } else {
        // Pretty format for development
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(
                fmt::layer()
                    .pretty()
                    .with_timer(EasternTimer)
                    .with_target(true),
            )
            .try_init()
    };

    result.map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_eastern_timer_render() {
        // 17:05:09 UTC is 12:05:09 PM EST
        let winter = Utc.with_ymd_and_hms(2025, 1, 15, 17, 5, 9).unwrap();
        assert_eq!(EasternTimer::render(winter), "01/15/2025 12:05:09 PM");

        // 03:30 UTC in July is 11:30 PM EDT the day before
        let summer = Utc.with_ymd_and_hms(2025, 7, 4, 3, 30, 0).unwrap();
        assert_eq!(EasternTimer::render(summer), "07/03/2025 11:30:00 PM");
    }

    #[test]
    fn test_config_defaults() {
        let config: LoggingConfig = toml::from_str("").unwrap();
        assert_eq!(config, LoggingConfig::default());
        assert_eq!(config.level, "info");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_config_from_toml() {
        let config: LoggingConfig = toml::from_str(
            r#"
            level = "debug,reqwest=warn"
            log_file = "main_process_logger.log"
            json = true
            "#,
        )
        .unwrap();
        assert_eq!(config.level, "debug,reqwest=warn");
        assert_eq!(config.log_file, Some(PathBuf::from("main_process_logger.log")));
        assert!(config.json);
    }

    #[test]
    fn test_open_log_file_appends() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("main.log");
        std::fs::write(&path, "first\n").unwrap();

        use std::io::Write;
        let mut file = open_log_file(&path).unwrap();
        file.write_all(b"second\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_open_log_file_in_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("main.log");
        assert!(matches!(
            open_log_file(&path),
            Err(TelemetryError::LogFile { .. })
        ));
    }
}
