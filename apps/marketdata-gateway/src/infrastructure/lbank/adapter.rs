//! LBank market data adapter: payload decoders plus the acquisition façade.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use crate::application::ports::MarketDataPort;
use crate::domain::market::{
    BookLevel, Candle, MarketStats, OrderBookSnapshot, OrderSide, PriceQuote, Trade,
};
use crate::observability;

use super::api_types::{
    DepthResponse, KlineResponse, RawNumber, TickerResponse, TradeEntry, TradesResponse,
};
use super::config::{LbankConfig, LbankCredentials};
use super::fetcher::{FetchError, RoutedFetcher};
use super::symbol::normalize;

/// Depth levels requested per side.
const DEPTH_SIZE: u32 = 20;
/// Kline interval token.
const CANDLE_INTERVAL: &str = "minute1";
/// Candles requested per call.
const CANDLE_LOOKBACK: u32 = 60;
/// Trades requested per call.
const TRADE_PAGE_SIZE: u32 = 50;

/// LBank implementation of [`MarketDataPort`].
///
/// Each operation normalizes the symbol, builds the endpoint path, fetches
/// through the relay routes, and decodes the payload. Every failure along
/// that path - exhausted routes, missing success marker, malformed data -
/// collapses into the operation's "no data" return value; nothing is raised
/// to the caller.
#[derive(Debug, Clone)]
pub struct LbankMarketData {
    fetcher: RoutedFetcher,
    credentials: Option<LbankCredentials>,
}

impl LbankMarketData {
    /// Build the adapter from config.
    pub fn new(config: &LbankConfig) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: RoutedFetcher::new(config)?,
            credentials: config.credentials.clone(),
        })
    }

    /// Whether API credentials were configured. The market data endpoints
    /// are public; credentials only matter for signed extensions.
    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    async fn fetch(&self, operation: &'static str, endpoint: &str) -> Option<Value> {
        match self.fetcher.fetch_json(endpoint).await {
            Ok(payload) => Some(payload),
            Err(err) => {
                tracing::warn!(operation, error = %err, "acquisition failed, returning no data");
                observability::record_no_data(operation);
                None
            }
        }
    }
}

#[async_trait]
impl MarketDataPort for LbankMarketData {
    async fn product_ticker(&self, symbol: &str) -> Option<PriceQuote> {
        let formatted = normalize(symbol);
        let endpoint = format!("/ticker/24hr.do?symbol={formatted}");
        let payload = self.fetch("ticker", &endpoint).await?;
        let quote = decode_price(payload);
        if quote.is_none() {
            observability::record_no_data("ticker");
        }
        quote
    }

    async fn product_stats(&self, symbol: &str) -> Option<MarketStats> {
        let formatted = normalize(symbol);
        let endpoint = format!("/ticker/24hr.do?symbol={formatted}");
        let payload = self.fetch("stats", &endpoint).await?;
        let stats = decode_stats(payload);
        if stats.is_none() {
            observability::record_no_data("stats");
        }
        stats
    }

    async fn order_book(&self, symbol: &str, _reference_price: f64) -> OrderBookSnapshot {
        let formatted = normalize(symbol);
        let endpoint = format!("/depth.do?symbol={formatted}&size={DEPTH_SIZE}");
        match self.fetch("depth", &endpoint).await {
            Some(payload) => {
                let book = decode_order_book(payload);
                if book.is_empty() {
                    observability::record_no_data("depth");
                }
                book
            }
            None => OrderBookSnapshot::default(),
        }
    }

    async fn candles(&self, symbol: &str) -> Vec<Candle> {
        let formatted = normalize(symbol);
        // LBank takes the kline cursor in whole seconds.
        let now_s = Utc::now().timestamp();
        let endpoint = format!(
            "/kline.do?symbol={formatted}&size={CANDLE_LOOKBACK}&type={CANDLE_INTERVAL}&time={now_s}"
        );
        match self.fetch("kline", &endpoint).await {
            Some(payload) => {
                let candles = decode_candles(payload);
                if candles.is_empty() {
                    observability::record_no_data("kline");
                }
                candles
            }
            None => Vec::new(),
        }
    }

    async fn recent_trades(&self, symbol: &str) -> Vec<Trade> {
        let formatted = normalize(symbol);
        let endpoint = format!("/trades.do?symbol={formatted}&size={TRADE_PAGE_SIZE}");
        match self.fetch("trades", &endpoint).await {
            Some(payload) => {
                let trades = decode_trades(payload);
                if trades.is_empty() {
                    observability::record_no_data("trades");
                }
                trades
            }
            None => Vec::new(),
        }
    }
}

// ── Decoders ────────────────────────────────────────────────────────────
//
// Pure projections from a raw JSON payload into canonical records. Each
// rejects - producing "no data", never an error - when the payload lacks
// the success marker or its data section is missing or empty.

/// Decode the latest price from a ticker payload.
fn decode_price(payload: Value) -> Option<PriceQuote> {
    let response: TickerResponse = serde_json::from_value(payload).ok()?;
    if !response.ok() {
        return None;
    }

    let latest = response.data.first()?.ticker.latest.as_f64()?;
    if !latest.is_finite() || latest < 0.0 {
        return None;
    }
    Some(PriceQuote { last_price: latest })
}

/// Decode 24h stats from a ticker payload.
fn decode_stats(payload: Value) -> Option<MarketStats> {
    let response: TickerResponse = serde_json::from_value(payload).ok()?;
    if !response.ok() {
        return None;
    }

    let ticker = &response.data.first()?.ticker;
    Some(MarketStats {
        volume_24h: ticker.vol.as_f64()?,
        price_change_24h: ticker.change.as_f64()?,
    })
}

/// Decode an order book snapshot from a depth payload.
///
/// A missing data section yields empty books, uniform with a fetch
/// failure. Upstream ordering is preserved; a pair whose price or amount
/// fails coercion is skipped.
fn decode_order_book(payload: Value) -> OrderBookSnapshot {
    let Ok(response) = serde_json::from_value::<DepthResponse>(payload) else {
        return OrderBookSnapshot::default();
    };
    if !response.ok() {
        return OrderBookSnapshot::default();
    }
    let Some(data) = response.data else {
        return OrderBookSnapshot::default();
    };

    OrderBookSnapshot {
        bids: decode_levels(&data.bids, OrderSide::Buy),
        asks: decode_levels(&data.asks, OrderSide::Sell),
    }
}

fn decode_levels(pairs: &[Vec<RawNumber>], side: OrderSide) -> Vec<BookLevel> {
    pairs
        .iter()
        .filter_map(|pair| {
            let price = pair.first()?.as_f64()?;
            let amount = pair.get(1)?.as_f64()?;
            Some(BookLevel::new(price, amount, side))
        })
        .collect()
}

/// Decode candles from a kline payload.
///
/// The first positional field arrives in whole seconds and is normalized
/// to milliseconds. Rows narrower than six fields, or with values that
/// fail coercion, are skipped rather than aborting the whole batch.
fn decode_candles(payload: Value) -> Vec<Candle> {
    let Ok(response) = serde_json::from_value::<KlineResponse>(payload) else {
        return Vec::new();
    };
    if !response.ok() {
        return Vec::new();
    }

    response
        .data
        .iter()
        .filter_map(|row| {
            let candle = decode_candle_row(row);
            if candle.is_none() {
                tracing::debug!(width = row.len(), "skipping malformed kline row");
            }
            candle
        })
        .collect()
}

fn decode_candle_row(row: &[RawNumber]) -> Option<Candle> {
    let open_time_s = row.first()?.as_f64()?;
    Some(Candle {
        open_time_ms: open_time_s as i64 * 1000,
        open: row.get(1)?.as_f64()?,
        high: row.get(2)?.as_f64()?,
        low: row.get(3)?.as_f64()?,
        close: row.get(4)?.as_f64()?,
        volume: row.get(5)?.as_f64()?,
    })
}

/// Decode trades from a trade-history payload.
///
/// Exactly the token `"buy"` maps to [`OrderSide::Buy`]; every other token
/// maps to [`OrderSide::Sell`]. There is no "unknown side" outcome.
fn decode_trades(payload: Value) -> Vec<Trade> {
    let Ok(response) = serde_json::from_value::<TradesResponse>(payload) else {
        return Vec::new();
    };
    if !response.ok() {
        return Vec::new();
    }

    response
        .data
        .into_iter()
        .filter_map(|entry| {
            let tid = entry.tid.clone();
            let trade = decode_trade_entry(entry);
            if trade.is_none() {
                tracing::debug!(tid = %tid, "skipping malformed trade entry");
            }
            trade
        })
        .collect()
}

fn decode_trade_entry(entry: TradeEntry) -> Option<Trade> {
    let side = if entry.side == "buy" {
        OrderSide::Buy
    } else {
        OrderSide::Sell
    };
    Some(Trade {
        id: entry.tid,
        price: entry.price.as_f64()?,
        amount: entry.amount.as_f64()?,
        side,
        timestamp_ms: entry.date_ms.as_f64()? as i64,
        from_bot: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── Ticker ──────────────────────────────────────────────────────────

    #[test]
    fn price_from_string_field() {
        let quote = decode_price(json!({
            "result": "true",
            "data": [{"ticker": {"latest": "42000.53", "vol": "100", "change": "1.5"}}]
        }))
        .unwrap();
        assert_eq!(quote.last_price, 42_000.53);
    }

    #[test]
    fn price_from_numeric_field() {
        let quote = decode_price(json!({
            "result": "true",
            "data": [{"ticker": {"latest": 42000.53, "vol": 100, "change": 1.5}}]
        }))
        .unwrap();
        assert_eq!(quote.last_price, 42_000.53);
    }

    #[test]
    fn price_rejects_false_result() {
        assert!(decode_price(json!({"result": "false", "data": []})).is_none());
    }

    #[test]
    fn price_rejects_empty_data() {
        assert!(decode_price(json!({"result": "true", "data": []})).is_none());
    }

    #[test]
    fn price_rejects_missing_data() {
        assert!(decode_price(json!({"result": "true"})).is_none());
    }

    #[test]
    fn price_rejects_negative() {
        assert!(
            decode_price(json!({
                "result": "true",
                "data": [{"ticker": {"latest": "-1.0", "vol": "0", "change": "0"}}]
            }))
            .is_none()
        );
    }

    #[test]
    fn stats_with_mixed_encodings() {
        let stats = decode_stats(json!({
            "result": "true",
            "data": [{"ticker": {"latest": "1", "vol": 1234.5, "change": "-2.75"}}]
        }))
        .unwrap();
        assert_eq!(stats.volume_24h, 1234.5);
        assert_eq!(stats.price_change_24h, -2.75);
    }

    #[test]
    fn stats_rejects_unparseable_field() {
        assert!(
            decode_stats(json!({
                "result": "true",
                "data": [{"ticker": {"latest": "1", "vol": "oops", "change": "1"}}]
            }))
            .is_none()
        );
    }

    // ── Depth ───────────────────────────────────────────────────────────

    fn depth_payload(bids: Value, asks: Value) -> Value {
        json!({"result": "true", "data": {"bids": bids, "asks": asks}})
    }

    #[test]
    fn depth_string_and_number_decode_identically() {
        let quoted = decode_order_book(depth_payload(
            json!([["42000.5", "0.25"], ["41999.0", "1.0"]]),
            json!([["42001.0", "0.5"]]),
        ));
        let native = decode_order_book(depth_payload(
            json!([[42000.5, 0.25], [41999.0, 1.0]]),
            json!([[42001.0, 0.5]]),
        ));

        assert_eq!(quoted.bids.len(), native.bids.len());
        for (a, b) in quoted.bids.iter().zip(&native.bids) {
            assert_eq!(a.price, b.price);
            assert_eq!(a.amount, b.amount);
            assert_eq!(a.total, b.total);
            assert_eq!(a.side, b.side);
        }
        assert_eq!(quoted.asks[0].price, native.asks[0].price);
    }

    #[test]
    fn depth_totals_and_sides() {
        let book = decode_order_book(depth_payload(
            json!([["100.0", "2.0"]]),
            json!([["101.0", "3.0"]]),
        ));
        assert_eq!(book.bids[0].side, OrderSide::Buy);
        assert_eq!(book.bids[0].total, 200.0);
        assert_eq!(book.asks[0].side, OrderSide::Sell);
        assert_eq!(book.asks[0].total, 303.0);
        assert!(!book.bids[0].from_bot);
    }

    #[test]
    fn depth_preserves_upstream_order() {
        let book = decode_order_book(depth_payload(
            json!([["3.0", "1"], ["2.0", "1"], ["1.0", "1"]]),
            json!([]),
        ));
        let prices: Vec<f64> = book.bids.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn depth_missing_data_yields_empty_books() {
        let book = decode_order_book(json!({"result": "true"}));
        assert!(book.is_empty());
    }

    #[test]
    fn depth_false_result_yields_empty_books() {
        let book = decode_order_book(json!({"result": "false"}));
        assert!(book.is_empty());
    }

    #[test]
    fn depth_skips_uncoercible_pair() {
        let book = decode_order_book(depth_payload(
            json!([["bad", "1.0"], ["2.0", "1.0"]]),
            json!([]),
        ));
        assert_eq!(book.bids.len(), 1);
        assert_eq!(book.bids[0].price, 2.0);
    }

    // ── Kline ───────────────────────────────────────────────────────────

    #[test]
    fn candle_time_seconds_to_millis() {
        let candles = decode_candles(json!({
            "result": "true",
            "data": [[1_700_000_000, 1.0, 2.0, 0.5, 1.5, 10.0]]
        }));
        assert_eq!(candles[0].open_time_ms, 1_700_000_000_000);
    }

    #[test]
    fn candle_fields_map_positionally() {
        let candles = decode_candles(json!({
            "result": "true",
            "data": [["1700000000", "1.0", "2.0", "0.5", "1.5", "10.0"]]
        }));
        let c = candles[0];
        assert_eq!(c.open, 1.0);
        assert_eq!(c.high, 2.0);
        assert_eq!(c.low, 0.5);
        assert_eq!(c.close, 1.5);
        assert_eq!(c.volume, 10.0);
    }

    #[test]
    fn candle_skips_narrow_rows() {
        let candles = decode_candles(json!({
            "result": "true",
            "data": [
                [1_700_000_000, 1.0, 2.0, 0.5],
                [1_700_000_060, 1.5, 2.5, 1.0, 2.0, 5.0]
            ]
        }));
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].open_time_ms, 1_700_000_060_000);
    }

    #[test]
    fn candle_skips_uncoercible_rows() {
        let candles = decode_candles(json!({
            "result": "true",
            "data": [
                [1_700_000_000, "x", 2.0, 0.5, 1.5, 10.0],
                [1_700_000_060, 1.5, 2.5, 1.0, 2.0, 5.0]
            ]
        }));
        assert_eq!(candles.len(), 1);
    }

    #[test]
    fn candles_empty_on_false_result() {
        assert!(decode_candles(json!({"result": "false"})).is_empty());
    }

    // ── Trades ──────────────────────────────────────────────────────────

    fn trade(side: &str) -> Value {
        json!({
            "result": "true",
            "data": [{
                "tid": "t-1",
                "price": "100.5",
                "amount": "0.2",
                "type": side,
                "date_ms": 1_700_000_000_000_i64
            }]
        })
    }

    #[test]
    fn trade_buy_token_maps_to_buy() {
        assert_eq!(decode_trades(trade("buy"))[0].side, OrderSide::Buy);
    }

    #[test]
    fn trade_other_tokens_map_to_sell() {
        for token in ["sell", "SELL", "BUY", "Buy", ""] {
            assert_eq!(
                decode_trades(trade(token))[0].side,
                OrderSide::Sell,
                "token {token:?} should map to SELL"
            );
        }
    }

    #[test]
    fn trade_fields_decode() {
        let trades = decode_trades(trade("buy"));
        assert_eq!(trades[0].id, "t-1");
        assert_eq!(trades[0].price, 100.5);
        assert_eq!(trades[0].amount, 0.2);
        assert_eq!(trades[0].timestamp_ms, 1_700_000_000_000);
        assert!(!trades[0].from_bot);
    }

    #[test]
    fn trade_skips_uncoercible_entry() {
        let trades = decode_trades(json!({
            "result": "true",
            "data": [
                {"tid": "t-1", "price": "oops", "amount": "0.2", "type": "buy",
                 "date_ms": 1_700_000_000_000_i64},
                {"tid": "t-2", "price": "100.5", "amount": "0.2", "type": "sell",
                 "date_ms": 1_700_000_000_000_i64}
            ]
        }));
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].id, "t-2");
    }

    #[test]
    fn trades_empty_on_missing_data() {
        assert!(decode_trades(json!({"result": "true"})).is_empty());
    }
}
