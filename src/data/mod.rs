// Market data: HTTP client, errors, and the fetch-execution context
pub mod coingecko;
pub mod error;
pub mod fetch_context;

// Re-export commonly used types
pub use coingecko::{CoinGeckoClient, MarketDataSource};
pub use error::FetchError;
pub use fetch_context::{FetchContext, HttpFetchContext, SeriesResult, SnapshotResult};
