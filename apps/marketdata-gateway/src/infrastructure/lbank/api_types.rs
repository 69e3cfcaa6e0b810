//! Raw LBank API response shapes.
//!
//! The API marks success with a string `"result": "true"` and is
//! inconsistent about whether numeric fields are quoted. [`RawNumber`] is
//! the single coercion rule for that ambiguity: every numeric upstream
//! field deserializes through it, and nothing downstream of this module
//! ever sees a stringified number again.

use serde::Deserialize;

/// Value of the `result` field on a successful response.
const SUCCESS_MARKER: &str = "true";

/// A numeric field that may arrive as a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// Native JSON number.
    Float(f64),
    /// Number quoted as a string.
    Text(String),
}

impl RawNumber {
    /// Coerce to `f64`. Returns `None` for a string that does not parse
    /// as a finite number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
        }
    }
}

/// Ticker endpoint envelope: `/ticker/24hr.do`.
#[derive(Debug, Deserialize)]
pub struct TickerResponse {
    /// Success marker, `"true"` on success.
    pub result: String,
    /// One entry per requested symbol.
    #[serde(default)]
    pub data: Vec<TickerEntry>,
}

impl TickerResponse {
    /// Whether the upstream reported success.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.result == SUCCESS_MARKER
    }
}

/// One symbol's entry in the ticker response.
#[derive(Debug, Deserialize)]
pub struct TickerEntry {
    /// Nested ticker fields.
    pub ticker: TickerData,
}

/// Ticker fields. Only the fields this layer projects are modeled; the
/// rest (high, low, turnover) are ignored by serde.
#[derive(Debug, Deserialize)]
pub struct TickerData {
    /// Latest traded price.
    pub latest: RawNumber,
    /// 24h volume.
    pub vol: RawNumber,
    /// 24h price change.
    pub change: RawNumber,
}

/// Depth endpoint envelope: `/depth.do`.
#[derive(Debug, Deserialize)]
pub struct DepthResponse {
    /// Success marker.
    pub result: String,
    /// Book sides; may be absent entirely.
    pub data: Option<DepthData>,
}

impl DepthResponse {
    /// Whether the upstream reported success.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.result == SUCCESS_MARKER
    }
}

/// Bid and ask arrays, each entry a positional `[price, amount]` pair.
#[derive(Debug, Deserialize)]
pub struct DepthData {
    /// Bid levels, upstream order.
    #[serde(default)]
    pub bids: Vec<Vec<RawNumber>>,
    /// Ask levels, upstream order.
    #[serde(default)]
    pub asks: Vec<Vec<RawNumber>>,
}

/// Kline endpoint envelope: `/kline.do`. Each row is positional:
/// `[time_seconds, open, high, low, close, volume]`.
#[derive(Debug, Deserialize)]
pub struct KlineResponse {
    /// Success marker.
    pub result: String,
    /// Candle rows, chronological.
    #[serde(default)]
    pub data: Vec<Vec<RawNumber>>,
}

impl KlineResponse {
    /// Whether the upstream reported success.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.result == SUCCESS_MARKER
    }
}

/// Trades endpoint envelope: `/trades.do`.
#[derive(Debug, Deserialize)]
pub struct TradesResponse {
    /// Success marker.
    pub result: String,
    /// Trade entries, upstream order.
    #[serde(default)]
    pub data: Vec<TradeEntry>,
}

impl TradesResponse {
    /// Whether the upstream reported success.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.result == SUCCESS_MARKER
    }
}

/// One upstream trade record.
#[derive(Debug, Deserialize)]
pub struct TradeEntry {
    /// Upstream trade identifier.
    pub tid: String,
    /// Trade price.
    pub price: RawNumber,
    /// Trade quantity.
    pub amount: RawNumber,
    /// Side token, `"buy"` or anything else (treated as sell).
    #[serde(rename = "type")]
    pub side: String,
    /// Execution time, milliseconds since epoch.
    pub date_ms: RawNumber,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_number_from_float() {
        let n: RawNumber = serde_json::from_value(json!(42.5)).unwrap();
        assert_eq!(n.as_f64(), Some(42.5));
    }

    #[test]
    fn raw_number_from_integer() {
        let n: RawNumber = serde_json::from_value(json!(1_700_000_000)).unwrap();
        assert_eq!(n.as_f64(), Some(1_700_000_000.0));
    }

    #[test]
    fn raw_number_from_string() {
        let n: RawNumber = serde_json::from_value(json!("42000.53")).unwrap();
        assert_eq!(n.as_f64(), Some(42_000.53));
    }

    #[test]
    fn raw_number_unparseable_string() {
        let n: RawNumber = serde_json::from_value(json!("n/a")).unwrap();
        assert_eq!(n.as_f64(), None);
    }

    #[test]
    fn ticker_success_marker() {
        let response: TickerResponse = serde_json::from_value(json!({
            "result": "true",
            "data": [{"ticker": {"latest": "100.5", "vol": 12.0, "change": "-1.2"}}]
        }))
        .unwrap();
        assert!(response.ok());
        assert_eq!(response.data[0].ticker.latest.as_f64(), Some(100.5));
        assert_eq!(response.data[0].ticker.change.as_f64(), Some(-1.2));
    }

    #[test]
    fn ticker_false_marker() {
        let response: TickerResponse =
            serde_json::from_value(json!({"result": "false"})).unwrap();
        assert!(!response.ok());
        assert!(response.data.is_empty());
    }

    #[test]
    fn depth_missing_data_section() {
        let response: DepthResponse =
            serde_json::from_value(json!({"result": "true"})).unwrap();
        assert!(response.ok());
        assert!(response.data.is_none());
    }

    #[test]
    fn trade_entry_with_string_fields() {
        let entry: TradeEntry = serde_json::from_value(json!({
            "tid": "abc123",
            "price": "100.0",
            "amount": "0.5",
            "type": "buy",
            "date_ms": 1_700_000_000_000_i64
        }))
        .unwrap();
        assert_eq!(entry.tid, "abc123");
        assert_eq!(entry.date_ms.as_f64(), Some(1_700_000_000_000.0));
    }
}
