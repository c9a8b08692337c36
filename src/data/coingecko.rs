//! CoinGecko REST client.
//!
//! One method per endpoint. Responses are decoded straight into domain types;
//! URL building and body parsing are free functions so they can be checked
//! without a server.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::config::{COINGECKO, FetchPolicy, RetryPolicy};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::FetchError;
use crate::domain::{AssetSnapshot, ChartSeries, PricePoint, SeriesKey, normalize_snapshots};

/// Anything that can answer the two market-data queries.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataSource: Send + Sync {
    /// Current metrics for exactly `ids`.
    async fn markets(&self, ids: Vec<String>) -> Result<Vec<AssetSnapshot>, FetchError>;

    /// Price history for one asset over the key's timeframe.
    async fn market_chart(&self, key: SeriesKey) -> Result<ChartSeries, FetchError>;

    /// A unique identifier for this implementation (for logs).
    fn signature(&self) -> &'static str;
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    // Missing `prices` renders as an empty chart rather than an error
    #[serde(default)]
    prices: Vec<(f64, f64)>,
}

pub fn markets_url(base_url: &str, vs_currency: &str, ids: &[String]) -> String {
    let q = &COINGECKO.markets;
    format!(
        "{}/coins/markets?vs_currency={}&ids={}&order={}&per_page={}&page={}&sparkline={}&price_change_percentage={}",
        base_url.trim_end_matches('/'),
        vs_currency,
        ids.join(","),
        q.order,
        ids.len(),
        q.page,
        q.sparkline,
        q.price_change_percentage,
    )
}

pub fn market_chart_url(base_url: &str, vs_currency: &str, key: &SeriesKey) -> String {
    format!(
        "{}/coins/{}/market_chart?vs_currency={}&days={}",
        base_url.trim_end_matches('/'),
        key.asset_id,
        vs_currency,
        key.timeframe.days_param(),
    )
}

pub fn parse_markets(body: &str) -> Result<Vec<AssetSnapshot>, FetchError> {
    let snapshots: Vec<AssetSnapshot> = serde_json::from_str(body)?;
    Ok(normalize_snapshots(snapshots))
}

pub fn parse_market_chart(key: SeriesKey, body: &str) -> Result<ChartSeries, FetchError> {
    let response: MarketChartResponse = serde_json::from_str(body)?;
    let points = response
        .prices
        .into_iter()
        .map(|(timestamp, price)| PricePoint {
            timestamp_ms: timestamp.round() as i64,
            price,
        })
        .collect();
    Ok(ChartSeries::new(key, points))
}

/// HTTP client for the CoinGecko v3 API.
pub struct CoinGeckoClient {
    base_url: String,
    vs_currency: String,
    client: Client,
    retry: RetryPolicy,
}

impl CoinGeckoClient {
    pub fn new(policy: &FetchPolicy) -> Result<Self, FetchError> {
        #[cfg_attr(target_arch = "wasm32", allow(unused_mut))]
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            // No request timeout: a request that never resolves stays pending
            builder = builder.user_agent(COINGECKO.client.user_agent);
        }

        Ok(Self {
            base_url: policy.base_url.trim_end_matches('/').to_string(),
            vs_currency: COINGECKO.vs_currency.to_string(),
            client: builder.build()?,
            retry: policy.retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url` and return the body of a 2xx response, retrying per policy.
    async fn get_body(&self, url: &str) -> Result<String, FetchError> {
        let attempts = self.retry.attempts();
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.get_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < attempts && e.is_retryable() => {
                    log::warn!("GET {} failed ({:?}); retry {}/{}", url, e, attempt, attempts - 1);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once(&self, url: &str) -> Result<String, FetchError> {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_fetch_events {
            log::info!("GET {}", url);
        }

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        // A body that fails mid-read is a transport problem, not a payload one
        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataSource for CoinGeckoClient {
    async fn markets(&self, ids: Vec<String>) -> Result<Vec<AssetSnapshot>, FetchError> {
        let url = markets_url(&self.base_url, &self.vs_currency, &ids);
        let body = self.get_body(&url).await?;
        parse_markets(&body)
    }

    async fn market_chart(&self, key: SeriesKey) -> Result<ChartSeries, FetchError> {
        let url = market_chart_url(&self.base_url, &self.vs_currency, &key);
        let body = self.get_body(&url).await?;
        parse_market_chart(key, &body)
    }

    fn signature(&self) -> &'static str {
        "CoinGecko API"
    }
}
