//! HTTP client for the signed football endpoints.
//!
//! One call produces one authenticated GET and one validated envelope. The
//! client keeps no state between calls beyond its immutable registry,
//! credentials and connection pool.

use crate::error::{ApiError, ApiResult};
use crate::retry::RetryPolicy;
use crate::signer::{build_signed_params, Credentials, RequestParams};
use reqwest::Client;
use serde_json::Value;
use sportfeed_core::{EndpointName, EndpointRegistry, SharedClock};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Envelope `code` for success.
const CODE_SUCCESS: i64 = 0;
/// Envelope `code` for a missing resource.
const CODE_NOT_FOUND: i64 = 404;
/// Envelope `code` for an unspecified server error.
const CODE_UNKNOWN: i64 = 9999;

/// Transport settings for [`ApiClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

/// Client for the signed API endpoints.
pub struct ApiClient {
    /// HTTP client.
    client: Client,
    /// Endpoint name to URL mapping.
    registry: EndpointRegistry,
    credentials: Credentials,
    retry: RetryPolicy,
    /// Source of the `timestamp` parameter.
    clock: SharedClock,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(
        registry: EndpointRegistry,
        credentials: Credentials,
        config: ClientConfig,
        clock: SharedClock,
    ) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            registry,
            credentials,
            retry: config.retry,
            clock,
        })
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    pub fn user(&self) -> &str {
        self.credentials.user()
    }

    /// URL of a registered endpoint.
    pub fn url(&self, endpoint: EndpointName) -> Option<&str> {
        self.registry.url(endpoint)
    }

    /// Fetch a registered endpoint without extra parameters.
    pub async fn fetch(&self, endpoint: EndpointName) -> ApiResult<Value> {
        self.request(endpoint.as_str(), &RequestParams::new()).await
    }

    /// Issue a signed request against the named endpoint.
    ///
    /// Unknown names fail with `InvalidEndpoint` before any network activity.
    /// On success the full decoded envelope is returned unchanged.
    pub async fn request(&self, endpoint_name: &str, extra: &RequestParams) -> ApiResult<Value> {
        let (endpoint, url) = self
            .registry
            .resolve(endpoint_name)
            .map_err(|_| ApiError::InvalidEndpoint(endpoint_name.to_string()))?;

        let mut attempts_made = 0u32;
        loop {
            match self.request_once(endpoint, url, extra).await {
                Err(e) if self.retry.should_retry(&e, attempts_made) => {
                    attempts_made += 1;
                    let delay = self.retry.delay_for(attempts_made);
                    warn!(
                        endpoint = %endpoint,
                        attempt = attempts_made,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying request"
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }

    async fn request_once(
        &self,
        endpoint: EndpointName,
        url: &str,
        extra: &RequestParams,
    ) -> ApiResult<Value> {
        // Fresh timestamp per attempt, so retries are re-signed.
        let timestamp = self.clock.now().timestamp();
        let params = build_signed_params(&self.credentials, timestamp, extra);

        debug!(endpoint = %endpoint, url, timestamp, "Sending signed request");

        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::RequestFailed(format!("HTTP {status} for url: {url}")));
        }

        let envelope: Value = response
            .json()
            .await
            .map_err(|e| ApiError::RequestFailed(format!("Failed to decode response: {e}")))?;

        let envelope = validate_envelope(envelope)?;
        info!(endpoint = %endpoint, "Envelope accepted");
        Ok(envelope)
    }
}

/// Check the envelope's `code` and map it onto the error taxonomy.
///
/// Only a missing `code` is a format error. A present `code` that is not an
/// integer (`null`, `"0"`, ...) is treated like any other non-zero code.
pub fn validate_envelope(envelope: Value) -> ApiResult<Value> {
    let code = envelope
        .get("code")
        .ok_or(ApiError::InvalidResponseFormat)?;

    match envelope_code(code) {
        Some(CODE_SUCCESS) => Ok(envelope),
        Some(CODE_NOT_FOUND) => Err(ApiError::ResourceNotFound),
        Some(CODE_UNKNOWN) => Err(ApiError::UnknownApiError),
        _ => {
            let message = match envelope.get("message") {
                Some(Value::String(text)) => text.clone(),
                Some(Value::Null) | None => "Unknown error".to_string(),
                Some(other) => other.to_string(),
            };
            Err(ApiError::Api(message))
        }
    }
}

/// Integer value of `code`, accepting integral floats.
fn envelope_code(code: &Value) -> Option<i64> {
    code.as_i64().or_else(|| {
        code.as_f64()
            .filter(|f| f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_unchanged() {
        let envelope = json!({"code": 0, "results": [{"id": 1}], "query": {"total": 1}});
        assert_eq!(validate_envelope(envelope.clone()).unwrap(), envelope);
    }

    #[test]
    fn test_missing_code() {
        let err = validate_envelope(json!({"results": []})).unwrap_err();
        assert_eq!(err, ApiError::InvalidResponseFormat);
        assert_eq!(
            err.to_string(),
            "Invalid API response format - missing status code"
        );
    }

    #[test]
    fn test_non_object_body_is_invalid_format() {
        assert_eq!(
            validate_envelope(json!([1, 2, 3])).unwrap_err(),
            ApiError::InvalidResponseFormat
        );
        assert_eq!(
            validate_envelope(json!("code")).unwrap_err(),
            ApiError::InvalidResponseFormat
        );
    }

    #[test]
    fn test_non_integer_code_is_api_error() {
        assert_eq!(
            validate_envelope(json!({"code": "0"})).unwrap_err(),
            ApiError::Api("Unknown error".to_string())
        );
        assert_eq!(
            validate_envelope(json!({"code": null, "message": "maintenance"})).unwrap_err(),
            ApiError::Api("maintenance".to_string())
        );
        assert_eq!(
            validate_envelope(json!({"code": 0.5})).unwrap_err(),
            ApiError::Api("Unknown error".to_string())
        );
    }

    #[test]
    fn test_distinguished_codes() {
        assert_eq!(
            validate_envelope(json!({"code": 404})).unwrap_err(),
            ApiError::ResourceNotFound
        );
        assert_eq!(
            validate_envelope(json!({"code": 9999, "message": "ignored"})).unwrap_err(),
            ApiError::UnknownApiError
        );
    }

    #[test]
    fn test_other_code_keeps_message() {
        let err = validate_envelope(json!({"code": 1001, "message": "IP not authorized"}))
            .unwrap_err();
        assert_eq!(err, ApiError::Api("IP not authorized".to_string()));
        assert_eq!(err.to_string(), "API Error: IP not authorized");
    }

    #[test]
    fn test_other_code_without_message() {
        let err = validate_envelope(json!({"code": 7})).unwrap_err();
        assert_eq!(err.to_string(), "API Error: Unknown error");
    }

    #[test]
    fn test_integral_float_code() {
        assert!(validate_envelope(json!({"code": 0.0})).is_ok());
        assert_eq!(
            validate_envelope(json!({"code": 404.0})).unwrap_err(),
            ApiError::ResourceNotFound
        );
    }
}
