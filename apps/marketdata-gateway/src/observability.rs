//! Metrics recording for the acquisition pipeline.
//!
//! Counters are recorded through the `metrics` crate macros; once the
//! Prometheus exporter is installed they are served at `/metrics`.

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Outcome of a single relay route attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Route returned a parseable JSON body.
    Success,
    /// Transport-level fault (connect, DNS, timeout).
    TransportError,
    /// Response received but status was non-success.
    BadStatus,
    /// Response body failed to parse as JSON.
    ParseError,
}

impl RouteOutcome {
    /// Label value for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::TransportError => "transport_error",
            Self::BadStatus => "bad_status",
            Self::ParseError => "parse_error",
        }
    }
}

/// Install the Prometheus HTTP exporter on the given port.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()?;
    Ok(())
}

/// Count one relay route attempt with its outcome.
pub fn record_route_attempt(route: &str, outcome: RouteOutcome) {
    counter!(
        "relay_route_attempts_total",
        "route" => route.to_string(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

/// Count a request for which every configured route failed.
pub fn record_routes_exhausted() {
    counter!("relay_routes_exhausted_total").increment(1);
}

/// Count an operation that degraded to its "no data" result, whether the
/// fetch failed outright or the payload decoded to nothing.
pub fn record_no_data(operation: &'static str) {
    counter!("acquisition_no_data_total", "operation" => operation).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_labels() {
        assert_eq!(RouteOutcome::Success.as_str(), "success");
        assert_eq!(RouteOutcome::TransportError.as_str(), "transport_error");
        assert_eq!(RouteOutcome::BadStatus.as_str(), "bad_status");
        assert_eq!(RouteOutcome::ParseError.as_str(), "parse_error");
    }
}
