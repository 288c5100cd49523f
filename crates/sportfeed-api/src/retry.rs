//! Retry policy for transport failures.
//!
//! Retries are off by default: a failed endpoint is simply recorded and the
//! next cycle tries again. When enabled, only `RequestFailed` errors are
//! retried, with a delay of `backoff_factor ^ attempt` seconds.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound for a single backoff sleep.
const MAX_BACKOFF: Duration = Duration::from_secs(300);

/// Bounded retry-with-backoff configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Whether failed requests are retried at all. Default: false.
    #[serde(default)]
    pub enabled: bool,
    /// Additional attempts after the first one. Default: 3.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base of the exponential backoff, in seconds. Default: 1.2.
    #[serde(default = "default_backoff_factor")]
    pub backoff_factor: f64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_backoff_factor() -> f64 {
    1.2
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            max_retries: default_max_retries(),
            backoff_factor: default_backoff_factor(),
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Whether a request that failed with `error` after `attempts_made`
    /// retries should be tried again.
    pub fn should_retry(&self, error: &ApiError, attempts_made: u32) -> bool {
        self.enabled && error.is_retryable() && attempts_made < self.max_retries
    }

    /// Sleep before retry number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(32) as i32;
        let secs = self.backoff_factor.max(0.0).powi(exponent);
        if !secs.is_finite() || secs >= MAX_BACKOFF.as_secs_f64() {
            return MAX_BACKOFF;
        }
        Duration::from_secs_f64(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_by_default() {
        let policy = RetryPolicy::default();
        assert!(!policy.enabled);
        assert_eq!(policy.max_retries, 3);
        assert!(!policy.should_retry(&ApiError::RequestFailed("timeout".into()), 0));
    }

    #[test]
    fn test_only_transport_errors_retry() {
        let policy = RetryPolicy {
            enabled: true,
            ..Default::default()
        };
        assert!(policy.should_retry(&ApiError::RequestFailed("reset".into()), 0));
        assert!(!policy.should_retry(&ApiError::ResourceNotFound, 0));
        assert!(!policy.should_retry(&ApiError::Api("bad sign".into()), 0));
        assert!(!policy.should_retry(&ApiError::InvalidEndpoint("x".into()), 0));
    }

    #[test]
    fn test_retry_budget() {
        let policy = RetryPolicy {
            enabled: true,
            max_retries: 2,
            backoff_factor: 1.2,
        };
        let err = ApiError::RequestFailed("reset".into());
        assert!(policy.should_retry(&err, 0));
        assert!(policy.should_retry(&err, 1));
        assert!(!policy.should_retry(&err, 2));
    }

    #[test]
    fn test_backoff_delays() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_secs_f64(1.2));
        assert!((policy.delay_for(2).as_secs_f64() - 1.44).abs() < 1e-6);

        let zero = RetryPolicy {
            backoff_factor: 0.0,
            ..Default::default()
        };
        assert_eq!(zero.delay_for(1), Duration::ZERO);

        let huge = RetryPolicy {
            backoff_factor: 100.0,
            ..Default::default()
        };
        assert_eq!(huge.delay_for(10), MAX_BACKOFF);
    }
}
