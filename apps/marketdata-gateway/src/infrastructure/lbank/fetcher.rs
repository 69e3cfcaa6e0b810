//! Routed fetcher with sequential relay fallback.

use std::sync::Arc;

use chrono::Utc;
use reqwest::{Client, Url};
use thiserror::Error;

use crate::observability::{self, RouteOutcome};

use super::config::LbankConfig;
use super::routes::RelayRoute;

/// Errors from the routed fetcher.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The base URL and endpoint path do not form a valid URL.
    #[error("invalid target URL {url}: {message}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// Parse error details.
        message: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build error: {0}")]
    ClientBuild(String),

    /// Every configured route failed for this request.
    #[error("all relay routes exhausted for {endpoint}")]
    AllRoutesExhausted {
        /// Endpoint path, for diagnostics.
        endpoint: String,
    },
}

/// Fetches exchange endpoints through an ordered list of relay routes.
///
/// One pass through the list per call: a transport fault, a non-success
/// status, or an unparseable body each advance to the next route; the first
/// successfully parsed JSON body wins. There is no caching, no backoff,
/// and no retry of the same route twice. Concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct RoutedFetcher {
    client: Client,
    base_url: String,
    routes: Vec<Arc<dyn RelayRoute>>,
}

impl RoutedFetcher {
    /// Build a fetcher from config.
    pub fn new(config: &LbankConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            routes: config.routes.clone(),
        })
    }

    /// Fetch `endpoint_path` (path plus query, e.g.
    /// `/depth.do?symbol=btc_usdt&size=20`) through the route list and
    /// return the first successfully parsed JSON body.
    pub async fn fetch_json(&self, endpoint_path: &str) -> Result<serde_json::Value, FetchError> {
        let target = self.target_url(endpoint_path)?;

        for route in &self.routes {
            let request_url = route.wrap(&target);

            let response = match self.client.get(request_url).send().await {
                Ok(response) => response,
                Err(e) => {
                    tracing::debug!(
                        route = route.name(),
                        endpoint = endpoint_path,
                        error = %e,
                        "relay transport fault, trying next route"
                    );
                    observability::record_route_attempt(route.name(), RouteOutcome::TransportError);
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                tracing::debug!(
                    route = route.name(),
                    endpoint = endpoint_path,
                    status = status.as_u16(),
                    "relay returned non-success status, trying next route"
                );
                observability::record_route_attempt(route.name(), RouteOutcome::BadStatus);
                continue;
            }

            match response.json::<serde_json::Value>().await {
                Ok(body) => {
                    observability::record_route_attempt(route.name(), RouteOutcome::Success);
                    return Ok(body);
                }
                Err(e) => {
                    tracing::debug!(
                        route = route.name(),
                        endpoint = endpoint_path,
                        error = %e,
                        "relay body was not JSON, trying next route"
                    );
                    observability::record_route_attempt(route.name(), RouteOutcome::ParseError);
                }
            }
        }

        observability::record_routes_exhausted();
        Err(FetchError::AllRoutesExhausted {
            endpoint: endpoint_path.to_string(),
        })
    }

    /// Fully-qualified upstream URL with a request-uniqueness parameter so
    /// intermediate caches cannot return stale bodies.
    fn target_url(&self, endpoint_path: &str) -> Result<Url, FetchError> {
        let raw = format!("{}{}", self.base_url, endpoint_path);
        let mut url = Url::parse(&raw).map_err(|e| FetchError::InvalidUrl {
            url: raw,
            message: e.to_string(),
        })?;

        let cache_buster = Utc::now().timestamp_millis().to_string();
        url.query_pairs_mut().append_pair("_t", &cache_buster);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> RoutedFetcher {
        RoutedFetcher::new(&LbankConfig::default()).unwrap()
    }

    #[test]
    fn target_url_appends_cache_buster() {
        let url = fetcher()
            .target_url("/ticker/24hr.do?symbol=btc_usdt")
            .unwrap();

        assert!(url.as_str().starts_with(
            "https://api.lbkex.com/v2/ticker/24hr.do?symbol=btc_usdt&_t="
        ));
        let (_, value) = url.query_pairs().find(|(k, _)| k == "_t").unwrap();
        assert!(value.parse::<i64>().unwrap() > 0);
    }

    #[test]
    fn target_url_without_existing_query() {
        let url = fetcher().target_url("/timestamp.do").unwrap();
        assert!(url.as_str().starts_with("https://api.lbkex.com/v2/timestamp.do?_t="));
    }

    #[test]
    fn target_url_rejects_invalid_base() {
        let config = LbankConfig::default().with_base_url("not a url");
        let fetcher = RoutedFetcher::new(&config).unwrap();
        let err = fetcher.target_url("/depth.do").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }
}
