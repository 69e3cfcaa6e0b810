//! LBank exchange adapter.
//!
//! Composes the symbol normalizer, the routed fetcher, and the payload
//! decoders into the `MarketDataPort` implementation.

mod adapter;
mod api_types;
mod config;
mod fetcher;
mod routes;
mod symbol;

pub use adapter::LbankMarketData;
pub use config::{LbankConfig, LbankCredentials};
pub use fetcher::{FetchError, RoutedFetcher};
pub use routes::{QueryParamRelay, RelayRoute, default_routes};
pub use symbol::normalize;
