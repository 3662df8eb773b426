//! REST ticker fetcher.
//!
//! Polls the Binance public ticker endpoint for a single symbol.

use crate::feed::PriceFeed;
use async_trait::async_trait;
use monitor_core::MonitorError;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Ticker response: `{"symbol":"BTCUSDT","price":"66000.12000000"}`.
#[derive(Debug, Deserialize)]
struct TickerPrice {
    price: String,
}

/// Parse a ticker body into a price.
pub fn parse_ticker_price(body: &str) -> Result<f64, MonitorError> {
    let ticker: TickerPrice = serde_json::from_str(body)
        .map_err(|e| MonitorError::FeedUnavailable(format!("malformed ticker: {}", e)))?;

    let price = ticker
        .price
        .trim()
        .parse::<f64>()
        .map_err(|_| MonitorError::FeedUnavailable(format!("invalid price: {}", ticker.price)))?;

    if !price.is_finite() || price <= 0.0 {
        return Err(MonitorError::FeedUnavailable(format!(
            "non-positive price: {}",
            price
        )));
    }

    Ok(price)
}

/// Binance spot ticker feed.
pub struct BinancePriceFeed {
    client: reqwest::Client,
    base_url: String,
    symbol: String,
}

impl BinancePriceFeed {
    pub const BASE_URL: &'static str = "https://api.binance.com";
    const TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a feed for `symbol` (e.g. "BTCUSDT") against the public API.
    pub fn new(symbol: impl Into<String>) -> Result<Self, MonitorError> {
        Self::with_base_url(Self::BASE_URL, symbol)
    }

    /// Create a feed against a custom endpoint.
    pub fn with_base_url(
        base_url: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Result<Self, MonitorError> {
        let client = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()
            .map_err(|e| MonitorError::FeedUnavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            symbol: symbol.into().to_uppercase(),
        })
    }

    fn ticker_url(&self) -> String {
        format!(
            "{}/api/v3/ticker/price?symbol={}",
            self.base_url, self.symbol
        )
    }
}

#[async_trait]
impl PriceFeed for BinancePriceFeed {
    async fn fetch_price(&self) -> Result<f64, MonitorError> {
        let url = self.ticker_url();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MonitorError::FeedUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            debug!("Binance: ticker HTTP {}", response.status());
            return Err(MonitorError::FeedUnavailable(format!(
                "binance API returned status: {}",
                response.status().as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| MonitorError::FeedUnavailable(e.to_string()))?;

        parse_ticker_price(&body)
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }
}
