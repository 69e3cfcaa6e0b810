//! Market Data Port (Driven Port)
//!
//! The caller-facing acquisition surface. Every operation is asynchronous
//! and NEVER fails: transport faults, relay exhaustion, and malformed
//! payloads all collapse into the operation's documented "no data" return
//! value. Callers cannot distinguish "upstream has no data" from "all
//! routes failed" from "payload was malformed" - in every case the only
//! recoverable action is the same (render an empty state, retry later).
//!
//! Operations invoked concurrently are fully independent; this layer holds
//! no shared mutable state and offers no cancellation - a caller wanting a
//! deadline must impose one externally.

use async_trait::async_trait;

use crate::domain::market::{Candle, MarketStats, OrderBookSnapshot, PriceQuote, Trade};

/// Port for acquiring normalized market data.
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Latest traded price for a symbol, or `None` on any failure.
    async fn product_ticker(&self, symbol: &str) -> Option<PriceQuote>;

    /// 24h volume and price change for a symbol, or `None` on any failure.
    ///
    /// Both fields are independently optional at the source; a malformed
    /// upstream record yields `None` for the whole result.
    async fn product_stats(&self, symbol: &str) -> Option<MarketStats>;

    /// Top-of-book depth snapshot for a symbol.
    ///
    /// `reference_price` is accepted for interface parity with callers that
    /// track a current price alongside the book; this layer does not use it.
    /// Failure yields an empty snapshot, never an error.
    async fn order_book(&self, symbol: &str, reference_price: f64) -> OrderBookSnapshot;

    /// Recent one-minute candles, chronological as returned by upstream.
    /// Failure yields an empty vector.
    async fn candles(&self, symbol: &str) -> Vec<Candle>;

    /// Recent trades. Failure yields an empty vector.
    async fn recent_trades(&self, symbol: &str) -> Vec<Trade>;
}
