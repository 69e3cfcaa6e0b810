//! Marketdata Gateway Binary
//!
//! Fetches all five market datasets for one symbol through the relay
//! routes and logs a summary. Serves as the reference caller for the
//! acquisition library.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p marketdata-gateway
//! ```
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SYMBOL`: Trading pair to fetch (default: btc_usdt)
//! - `RELAY_ROUTES`: Ordered relay list, `name=endpoint[,name=endpoint...]`
//!   (default: corsproxy.io primary, allorigins backup)
//! - `LBANK_API_KEY` / `LBANK_API_SECRET`: API credentials (unused by the
//!   public read endpoints)
//! - `METRICS_PORT`: Prometheus exporter port; exporter disabled if unset
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;

use anyhow::Context;
use reqwest::Url;
use tracing::{info, warn};

use marketdata_gateway::infrastructure::lbank::default_routes;
use marketdata_gateway::telemetry::init_tracing;
use marketdata_gateway::{
    LbankConfig, LbankCredentials, LbankMarketData, MarketDataPort, QueryParamRelay, RelayRoute,
    observability,
};

/// Parsed configuration from environment variables.
struct GatewayConfig {
    symbol: String,
    routes: Vec<Arc<dyn RelayRoute>>,
    credentials: Option<LbankCredentials>,
    metrics_port: Option<u16>,
}

impl GatewayConfig {
    fn from_env() -> anyhow::Result<Self> {
        let symbol = std::env::var("SYMBOL").unwrap_or_else(|_| "btc_usdt".to_string());

        let routes = match std::env::var("RELAY_ROUTES") {
            Ok(list) => parse_routes(&list)?,
            Err(_) => default_routes(),
        };

        let credentials = match (
            std::env::var("LBANK_API_KEY"),
            std::env::var("LBANK_API_SECRET"),
        ) {
            (Ok(api_key), Ok(secret_key)) => Some(LbankCredentials {
                api_key,
                secret_key,
            }),
            _ => None,
        };

        let metrics_port = std::env::var("METRICS_PORT")
            .ok()
            .map(|v| v.parse::<u16>())
            .transpose()
            .context("METRICS_PORT must be a port number")?;

        Ok(Self {
            symbol,
            routes,
            credentials,
            metrics_port,
        })
    }
}

/// Parse a `name=endpoint[,name=endpoint...]` relay list.
fn parse_routes(list: &str) -> anyhow::Result<Vec<Arc<dyn RelayRoute>>> {
    let mut routes: Vec<Arc<dyn RelayRoute>> = Vec::new();
    for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, endpoint) = entry
            .split_once('=')
            .with_context(|| format!("relay entry {entry:?} is not name=endpoint"))?;
        let url = Url::parse(endpoint)
            .with_context(|| format!("relay endpoint {endpoint:?} is not a valid URL"))?;
        routes.push(Arc::new(QueryParamRelay::new(name, url)));
    }
    anyhow::ensure!(!routes.is_empty(), "RELAY_ROUTES resolved to an empty list");
    Ok(routes)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = GatewayConfig::from_env()?;

    if let Some(port) = config.metrics_port {
        observability::init_metrics(port)?;
        info!(port, "prometheus exporter started");
    }

    let route_names: Vec<&str> = config.routes.iter().map(|r| r.name()).collect();
    info!(
        symbol = %config.symbol,
        routes = ?route_names,
        credentials = config.credentials.is_some(),
        "marketdata gateway starting"
    );

    let mut lbank_config = LbankConfig::new().with_routes(config.routes);
    if let Some(credentials) = config.credentials {
        lbank_config = lbank_config.with_credentials(credentials);
    }
    let market_data = LbankMarketData::new(&lbank_config)?;

    let symbol = &config.symbol;

    match market_data.product_ticker(symbol).await {
        Some(quote) => info!(last_price = quote.last_price, "ticker"),
        None => warn!("ticker: no data"),
    }

    match market_data.product_stats(symbol).await {
        Some(stats) => info!(
            volume_24h = stats.volume_24h,
            price_change_24h = stats.price_change_24h,
            "stats"
        ),
        None => warn!("stats: no data"),
    }

    let book = market_data.order_book(symbol, 0.0).await;
    info!(bids = book.bids.len(), asks = book.asks.len(), "order book");

    let candles = market_data.candles(symbol).await;
    info!(count = candles.len(), "candles");

    let trades = market_data.recent_trades(symbol).await;
    info!(count = trades.len(), "recent trades");

    Ok(())
}
