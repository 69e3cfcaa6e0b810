//! Canonical market data records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Side of an order or trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    /// Buy side (bid).
    Buy,
    /// Sell side (ask).
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Latest traded price for an instrument.
///
/// An absent quote is represented as "no data" (`Option::None` at the port
/// surface), never as a zero price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Latest traded price.
    pub last_price: f64,
}

/// 24-hour rolling statistics for an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketStats {
    /// 24h traded volume.
    pub volume_24h: f64,
    /// 24h price change, signed, in the upstream's convention.
    pub price_change_24h: f64,
}

/// A single price level in the order book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookLevel {
    /// Synthetic identifier, generated locally.
    pub id: String,
    /// Level price.
    pub price: f64,
    /// Level quantity.
    pub amount: f64,
    /// Book side this level belongs to.
    pub side: OrderSide,
    /// Notional value; always derived as `price * amount`, never taken
    /// from upstream.
    pub total: f64,
    /// Origin flag; always `false` for acquired data (levels injected by a
    /// simulated market-maker would carry `true`).
    pub from_bot: bool,
}

impl BookLevel {
    /// Create a level from decoded price and amount.
    #[must_use]
    pub fn new(price: f64, amount: f64, side: OrderSide) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            price,
            amount,
            side,
            total: price * amount,
            from_bot: false,
        }
    }
}

/// An order book snapshot, bids and asks in upstream order
/// (typically best-first).
///
/// The sequences may be empty but are never absent: an empty book signals
/// "no data" uniformly with a fetch failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// Bid levels.
    pub bids: Vec<BookLevel>,
    /// Ask levels.
    pub asks: Vec<BookLevel>,
}

impl OrderBookSnapshot {
    /// Check whether both sides are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

/// An executed trade reported by the exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Upstream trade identifier; opaque, unique only per the upstream's
    /// own guarantee.
    pub id: String,
    /// Trade price.
    pub price: f64,
    /// Trade quantity.
    pub amount: f64,
    /// Taker side.
    pub side: OrderSide,
    /// Execution time, milliseconds since epoch.
    pub timestamp_ms: i64,
    /// Origin flag; always `false` for acquired data.
    pub from_bot: bool,
}

/// A single OHLCV candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Candle open time, milliseconds since epoch.
    pub open_time_ms: i64,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_level_total_is_derived() {
        let level = BookLevel::new(42_000.5, 0.25, OrderSide::Buy);
        assert_eq!(level.total, 42_000.5 * 0.25);
        assert!(!level.from_bot);
    }

    #[test]
    fn book_level_ids_are_unique() {
        let a = BookLevel::new(1.0, 1.0, OrderSide::Sell);
        let b = BookLevel::new(1.0, 1.0, OrderSide::Sell);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn empty_snapshot() {
        let snapshot = OrderBookSnapshot::default();
        assert!(snapshot.is_empty());

        let one_sided = OrderBookSnapshot {
            bids: vec![BookLevel::new(1.0, 1.0, OrderSide::Buy)],
            asks: vec![],
        };
        assert!(!one_sided.is_empty());
    }

    #[test]
    fn order_side_serde_uppercase() {
        let json = serde_json::to_string(&OrderSide::Buy).unwrap();
        assert_eq!(json, "\"BUY\"");
        let side: OrderSide = serde_json::from_str("\"SELL\"").unwrap();
        assert_eq!(side, OrderSide::Sell);
    }
}
