//! Tracing Setup
//!
//! Console subscriber with env-filter. Log level is controlled by
//! `RUST_LOG` (default: `info`).

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Safe to call once per process; a second call is a no-op failure that is
/// ignored so tests can initialize independently.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init();
}
