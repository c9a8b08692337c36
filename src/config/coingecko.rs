//! CoinGecko-specific configuration constants and types.

use std::time::Duration;

use crate::config::REFRESH;

/// Retry policy applied by the HTTP client to a single refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// Surface the first failure. Default.
    #[default]
    None,
    /// Re-issue the request immediately on transport failures and 5xx
    /// responses, up to `max_retries` extra attempts.
    Immediate { max_retries: u32 },
}

impl RetryPolicy {
    pub fn from_retries(retries: u32) -> Self {
        if retries == 0 {
            RetryPolicy::None
        } else {
            RetryPolicy::Immediate {
                max_retries: retries,
            }
        }
    }

    /// Total number of attempts for one request (initial + retries).
    pub fn attempts(&self) -> u32 {
        match self {
            RetryPolicy::None => 1,
            RetryPolicy::Immediate { max_retries } => 1 + max_retries,
        }
    }
}

/// Runtime policy handed to the fetch context.
/// (This is the runtime struct; the consts below are its defaults.)
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    pub base_url: String,
    pub retry: RetryPolicy,
    /// How long a chart series for a timeframe that is no longer displayed
    /// stays in the cache.
    pub inactive_series_ttl: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            base_url: COINGECKO.base_url.to_string(),
            retry: RetryPolicy::None,
            inactive_series_ttl: REFRESH.inactive_series_ttl,
        }
    }
}

/// Query parameters for the `/coins/markets` endpoint
pub struct MarketsQuery {
    pub order: &'static str,
    pub page: u32,
    pub sparkline: bool,
    pub price_change_percentage: &'static str,
}

/// Default values for the Rest Client
pub struct ClientDefaults {
    /// Only applied on native builds; the browser sets its own.
    pub user_agent: &'static str,
}

/// The Master Configuration Struct
pub struct CoinGeckoConfig {
    pub base_url: &'static str,
    pub vs_currency: &'static str,
    /// The three assets shown as cards. Exactly these ids are requested.
    pub tracked_ids: [&'static str; 3],
    /// Asset whose history is charted.
    pub chart_asset: &'static str,
    pub markets: MarketsQuery,
    pub client: ClientDefaults,
}

pub const COINGECKO: CoinGeckoConfig = CoinGeckoConfig {
    base_url: "https://api.coingecko.com/api/v3",
    vs_currency: "usd",
    tracked_ids: ["bitcoin", "ethereum", "dogecoin"],
    chart_asset: "bitcoin",
    markets: MarketsQuery {
        order: "market_cap_desc",
        page: 1,
        sparkline: false,
        price_change_percentage: "24h",
    },
    client: ClientDefaults {
        user_agent: concat!("crypto-dashboard/", env!("CARGO_PKG_VERSION")),
    },
};
