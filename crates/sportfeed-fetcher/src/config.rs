//! Application configuration.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use sportfeed_api::{Credentials, RetryPolicy};
use sportfeed_core::{EndpointName, EndpointRegistry, DEFAULT_BASE_URL};
use sportfeed_persistence::DEFAULT_FILE_PREFIX;
use sportfeed_telemetry::LoggingConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the API user.
pub const ENV_API_USER: &str = "API_USER";
/// Environment variable overriding the API secret.
pub const ENV_API_SECRET: &str = "API_SECRET";
/// Environment variable naming the config file.
pub const ENV_CONFIG_PATH: &str = "SPORTFEED_CONFIG";
/// Config file used when neither the CLI nor the environment names one.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// API access configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL all endpoint paths are joined to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_secret")]
    pub secret: String,
    /// HTTP request timeout (seconds). Default: 30.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Pause after each successful fetch (ms). Default: 1,000.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    /// Endpoints fetched per cycle, in order. Default: all six.
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<EndpointName>,
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user() -> String {
    "thenecpt".to_string()
}

fn default_secret() -> String {
    "0c55322e8e196d6ef9066fa4252cf386".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_request_delay_ms() -> u64 {
    1_000
}

fn default_endpoints() -> Vec<EndpointName> {
    EndpointName::ALL.to_vec()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user: default_user(),
            secret: default_secret(),
            timeout_secs: default_timeout_secs(),
            request_delay_ms: default_request_delay_ms(),
            endpoints: default_endpoints(),
            retry: RetryPolicy::default(),
        }
    }
}

impl ApiConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.user.clone(), self.secret.clone())
    }

    pub fn registry(&self) -> EndpointRegistry {
        EndpointRegistry::with_endpoints(&self.base_url, &self.endpoints)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

/// Daily document storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for live and archived documents. Default: ".".
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_file_prefix() -> String {
    DEFAULT_FILE_PREFIX.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_prefix: default_file_prefix(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Resolve the config path (CLI arg > `SPORTFEED_CONFIG` > default) and
    /// load it, falling back to defaults when the file does not exist.
    /// Credential environment variables are applied last.
    pub fn load(cli_path: Option<&str>) -> AppResult<Self> {
        let config_path = cli_path
            .map(str::to_string)
            .or_else(|| std::env::var(ENV_CONFIG_PATH).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else if cli_path.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {config_path}"
            )));
        } else {
            Self::default()
        };

        config.apply_env_overrides(
            std::env::var(ENV_API_USER).ok(),
            std::env::var(ENV_API_SECRET).ok(),
        );
        config.validate()?;
        Ok(config)
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Replace credentials with non-empty override values.
    pub fn apply_env_overrides(&mut self, user: Option<String>, secret: Option<String>) {
        if let Some(user) = user.filter(|u| !u.is_empty()) {
            self.api.user = user;
        }
        if let Some(secret) = secret.filter(|s| !s.is_empty()) {
            self.api.secret = secret;
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::Config("api.base_url must not be empty".to_string()));
        }
        if self.api.endpoints.is_empty() {
            return Err(AppError::Config("api.endpoints must not be empty".to_string()));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::Config("api.timeout_secs must be positive".to_string()));
        }
        if self.storage.file_prefix.is_empty() {
            return Err(AppError::Config("storage.file_prefix must not be empty".to_string()));
        }
        Ok(())
    }
}
