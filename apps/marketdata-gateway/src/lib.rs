// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines
    )
)]

//! Marketdata Gateway - Library
//!
//! Resilient acquisition layer for LBank market data. The calling
//! environment cannot reach the exchange origin directly (cross-origin
//! policy), so every request is re-issued through an ordered list of relay
//! routes with sequential fallback, and the exchange's inconsistent
//! response shapes are normalized into a small set of canonical records.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: canonical market data records (`PriceQuote`, `MarketStats`,
//!   `BookLevel`, `OrderBookSnapshot`, `Trade`, `Candle`)
//! - **Application**: `MarketDataPort`, the caller-facing surface. Every
//!   operation absorbs failure and returns a "no data" value instead of an
//!   error.
//! - **Infrastructure**: the LBank adapter - symbol normalization, the
//!   routed fetcher, and the payload decoders.
//!
//! # Failure policy
//!
//! Callers always receive a well-typed result: an absent value or an empty
//! collection. Transport faults, relay exhaustion, and malformed payloads
//! are logged and counted, never raised across the port boundary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Domain layer - canonical market data records.
pub mod domain;

/// Application layer - port definitions.
pub mod application;

/// Infrastructure layer - the LBank exchange adapter.
pub mod infrastructure;

/// Metrics recording helpers.
pub mod observability;

/// Tracing subscriber setup.
pub mod telemetry;

pub use application::ports::MarketDataPort;
pub use domain::market::{
    BookLevel, Candle, MarketStats, OrderBookSnapshot, OrderSide, PriceQuote, Trade,
};
pub use infrastructure::lbank::{
    LbankConfig, LbankCredentials, LbankMarketData, QueryParamRelay, RelayRoute,
};
