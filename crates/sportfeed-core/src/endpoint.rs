//! Endpoint identification and the immutable endpoint registry.
//!
//! The collector talks to a fixed set of football endpoints. Each endpoint is
//! identified by a short name and resolves to `{base_url}{path}`.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.thesports.com/v1/football";

/// Name of a signed API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointName {
    Live,
    Details,
    Odds,
    Team,
    Competition,
    Country,
}

impl EndpointName {
    /// All endpoints in fetch order.
    pub const ALL: [EndpointName; 6] = [
        EndpointName::Live,
        EndpointName::Details,
        EndpointName::Odds,
        EndpointName::Team,
        EndpointName::Competition,
        EndpointName::Country,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Details => "details",
            Self::Odds => "odds",
            Self::Team => "team",
            Self::Competition => "competition",
            Self::Country => "country",
        }
    }

    /// Path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Live => "/match/detail_live",
            Self::Details => "/match/recent/list",
            Self::Odds => "/odds/history",
            Self::Team => "/team/additional/list",
            Self::Competition => "/competition/additional/list",
            Self::Country => "/country/list",
        }
    }
}

impl fmt::Display for EndpointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndpointName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| CoreError::UnknownEndpoint(s.to_string()))
    }
}

/// Immutable mapping from endpoint name to URL.
///
/// Built once at startup. Iteration follows insertion order, which is also
/// the order the driver fetches in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRegistry {
    urls: Vec<(EndpointName, String)>,
}

impl EndpointRegistry {
    /// Registry of all endpoints under `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self::with_endpoints(base_url, &EndpointName::ALL)
    }

    /// Registry restricted to `endpoints` (duplicates are ignored).
    pub fn with_endpoints(base_url: &str, endpoints: &[EndpointName]) -> Self {
        let base = base_url.trim_end_matches('/');
        let mut urls: Vec<(EndpointName, String)> = Vec::with_capacity(endpoints.len());
        for name in endpoints {
            if urls.iter().any(|(existing, _)| existing == name) {
                continue;
            }
            urls.push((*name, format!("{base}{}", name.path())));
        }
        Self { urls }
    }

    /// URL for a registered endpoint.
    pub fn url(&self, name: EndpointName) -> Option<&str> {
        self.urls
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, url)| url.as_str())
    }

    /// Resolve a raw endpoint name to its registered entry.
    pub fn resolve(&self, name: &str) -> Result<(EndpointName, &str)> {
        let endpoint = EndpointName::from_str(name)?;
        self.url(endpoint)
            .map(|url| (endpoint, url))
            .ok_or_else(|| CoreError::UnknownEndpoint(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (EndpointName, &str)> {
        self.urls.iter().map(|(n, url)| (*n, url.as_str()))
    }

    pub fn names(&self) -> Vec<EndpointName> {
        self.urls.iter().map(|(n, _)| *n).collect()
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

impl Default for EndpointRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_urls() {
        let registry = EndpointRegistry::default();
        assert_eq!(registry.len(), 6);
        assert_eq!(
            registry.url(EndpointName::Live),
            Some("https://api.thesports.com/v1/football/match/detail_live")
        );
        assert_eq!(
            registry.url(EndpointName::Country),
            Some("https://api.thesports.com/v1/football/country/list")
        );
    }

    #[test]
    fn test_registry_preserves_fetch_order() {
        let registry = EndpointRegistry::default();
        assert_eq!(registry.names(), EndpointName::ALL.to_vec());
    }

    #[test]
    fn test_resolve_unknown_name() {
        let registry = EndpointRegistry::default();
        let err = registry.resolve("standings").unwrap_err();
        assert!(matches!(err, CoreError::UnknownEndpoint(ref n) if n == "standings"));
        assert_eq!(err.to_string(), "Invalid endpoint: standings");
    }

    #[test]
    fn test_resolve_unregistered_name() {
        let registry =
            EndpointRegistry::with_endpoints("http://localhost:8080/", &[EndpointName::Team]);
        assert!(registry.resolve("live").is_err());

        let (name, url) = registry.resolve("team").unwrap();
        assert_eq!(name, EndpointName::Team);
        assert_eq!(url, "http://localhost:8080/team/additional/list");
    }

    #[test]
    fn test_with_endpoints_ignores_duplicates() {
        let registry = EndpointRegistry::with_endpoints(
            DEFAULT_BASE_URL,
            &[EndpointName::Odds, EndpointName::Odds, EndpointName::Live],
        );
        assert_eq!(registry.names(), vec![EndpointName::Odds, EndpointName::Live]);
    }

    #[test]
    fn test_endpoint_name_round_trip_str() {
        for name in EndpointName::ALL {
            assert_eq!(name.as_str().parse::<EndpointName>().unwrap(), name);
        }
        assert_eq!(
            serde_json::to_string(&EndpointName::Competition).unwrap(),
            "\"competition\""
        );
    }
}
