//! Relay route strategies.
//!
//! A relay is an intermediary HTTP service that forwards a request to the
//! real exchange API and returns its response body verbatim, used to work
//! around direct-access restrictions. Each route is polymorphic over a
//! single capability: wrapping the target URL per the relay's own URL
//! convention. The fetcher holds an ordered, configuration-injected list
//! of routes and falls back through it sequentially.

use std::fmt;
use std::sync::Arc;

use reqwest::Url;

/// A single relay strategy.
pub trait RelayRoute: Send + Sync + fmt::Debug {
    /// Short identifier used in logs and metrics labels.
    fn name(&self) -> &str;

    /// Wrap the target URL into the request URL this relay expects.
    fn wrap(&self, target: &Url) -> Url;
}

/// Relay that accepts the target as a URL-encoded query parameter,
/// e.g. `https://api.allorigins.win/raw?url=<encoded target>`.
#[derive(Debug, Clone)]
pub struct QueryParamRelay {
    name: String,
    endpoint: Url,
    param: String,
}

impl QueryParamRelay {
    /// Create a relay with the conventional `url` parameter name.
    #[must_use]
    pub fn new(name: impl Into<String>, endpoint: Url) -> Self {
        Self {
            name: name.into(),
            endpoint,
            param: "url".to_string(),
        }
    }

    /// Override the query parameter name.
    #[must_use]
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = param.into();
        self
    }
}

impl RelayRoute for QueryParamRelay {
    fn name(&self) -> &str {
        &self.name
    }

    fn wrap(&self, target: &Url) -> Url {
        let mut wrapped = self.endpoint.clone();
        wrapped
            .query_pairs_mut()
            .append_pair(&self.param, target.as_str());
        wrapped
    }
}

/// The default route list: corsproxy.io primary, allorigins backup.
///
/// # Panics
///
/// Never panics; the endpoint literals are valid URLs.
#[must_use]
pub fn default_routes() -> Vec<Arc<dyn RelayRoute>> {
    [
        ("corsproxy", "https://corsproxy.io/"),
        ("allorigins", "https://api.allorigins.win/raw"),
    ]
    .into_iter()
    .filter_map(|(name, endpoint)| {
        Url::parse(endpoint)
            .ok()
            .map(|url| Arc::new(QueryParamRelay::new(name, url)) as Arc<dyn RelayRoute>)
    })
    .collect()
}
