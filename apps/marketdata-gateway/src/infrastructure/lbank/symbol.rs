//! Trading-pair symbol normalization.

/// Map a user-entered trading-pair token into LBank's format
/// (lowercase with an underscore separator, e.g. `btc_usdt`).
///
/// `"BTC-USD"` and `"BTC/USDT"` both normalize; a token with no separator
/// (e.g. `"btcusdt"`) passes through unchanged - LBank usually requires the
/// underscore, so the caller is responsible for supplying an
/// upstream-valid token in that case. This is a known limitation, not a
/// defect to silently fix.
#[must_use]
pub fn normalize(symbol: &str) -> String {
    let mut s = symbol.to_lowercase();
    if s.contains('-') {
        s = s.replacen('-', "_", 1);
    }
    if s.contains('/') {
        s = s.replacen('/', "_", 1);
    }
    s
}
