#![allow(clippy::collapsible_if)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use config::{COINGECKO, FetchPolicy, REFRESH, RetryPolicy};
pub use data::{CoinGeckoClient, FetchContext, FetchError, HttpFetchContext, MarketDataSource};
pub use domain::{AssetSnapshot, ChartSeries, PricePoint, SeriesKey, Timeframe};
pub use ui::CryptoDashboardApp;
pub use utils::app_time;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of a CoinGecko-compatible API (e.g. a local mock server)
    #[arg(long, default_value_t = COINGECKO.base_url.to_string())]
    pub api_base_url: String,

    /// Immediate retries for transport failures and 5xx responses
    #[arg(long, default_value_t = 0)]
    pub retries: u32,
}

impl Cli {
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy {
            base_url: self.api_base_url.clone(),
            retry: RetryPolicy::from_retries(self.retries),
            ..FetchPolicy::default()
        }
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(
    cc: &eframe::CreationContext,
    fetch_ctx: Box<dyn FetchContext>,
    policy: &FetchPolicy,
) -> Box<dyn eframe::App> {
    let app = ui::CryptoDashboardApp::new(cc, fetch_ctx, policy);
    Box::new(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_to_public_api_without_retries() {
        let cli = Cli::parse_from(["crypto-dashboard"]);
        let policy = cli.fetch_policy();
        assert_eq!(policy.base_url, "https://api.coingecko.com/api/v3");
        assert_eq!(policy.retry, RetryPolicy::None);
    }

    #[test]
    fn cli_overrides_host_and_retries() {
        let cli = Cli::parse_from([
            "crypto-dashboard",
            "--api-base-url",
            "http://127.0.0.1:8080/api/v3",
            "--retries",
            "2",
        ]);
        let policy = cli.fetch_policy();
        assert_eq!(policy.base_url, "http://127.0.0.1:8080/api/v3");
        assert_eq!(policy.retry, RetryPolicy::Immediate { max_retries: 2 });
    }
}
