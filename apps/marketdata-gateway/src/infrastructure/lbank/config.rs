//! LBank adapter configuration.

use std::sync::Arc;
use std::time::Duration;

use super::routes::{RelayRoute, default_routes};

/// Base URL of the LBank v2 HTTP API.
pub const DEFAULT_BASE_URL: &str = "https://api.lbkex.com/v2";

/// API credentials.
///
/// The read-only market data endpoints are public; credentials are carried
/// as explicit configuration for callers that extend the adapter with
/// signed endpoints. Never logged.
#[derive(Clone)]
pub struct LbankCredentials {
    /// API key.
    pub api_key: String,
    /// API secret.
    pub secret_key: String,
}

// Manual Debug: keep key material out of log output.
impl std::fmt::Debug for LbankCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LbankCredentials")
            .field("api_key", &"***")
            .field("secret_key", &"***")
            .finish()
    }
}

/// Configuration for the LBank market data adapter.
#[derive(Debug, Clone)]
pub struct LbankConfig {
    /// Exchange API base URL.
    pub base_url: String,
    /// Ordered relay routes, tried first to last.
    pub routes: Vec<Arc<dyn RelayRoute>>,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// Optional API credentials.
    pub credentials: Option<LbankCredentials>,
}

impl Default for LbankConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            routes: default_routes(),
            timeout: Duration::from_secs(30),
            credentials: None,
        }
    }
}

impl LbankConfig {
    /// Create a configuration with the default base URL and route list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the exchange base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the relay route list.
    #[must_use]
    pub fn with_routes(mut self, routes: Vec<Arc<dyn RelayRoute>>) -> Self {
        self.routes = routes;
        self
    }

    /// Set the per-request HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attach API credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: LbankCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = LbankConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.credentials.is_none());
    }

    #[test]
    fn credentials_debug_is_redacted() {
        let creds = LbankCredentials {
            api_key: "key".to_string(),
            secret_key: "secret".to_string(),
        };
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("key\""));
        assert!(!rendered.contains("secret\""));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn builder_overrides() {
        let config = LbankConfig::new()
            .with_base_url("http://localhost:8080/v2")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "http://localhost:8080/v2");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
