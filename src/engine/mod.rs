// Refresh engine: timers, per-key request tracking, and the two fetch loops
pub mod chart_fetcher;
pub mod periodic;
pub mod refresh_state;
pub mod series_cache;
pub mod snapshot_fetcher;

// Re-export key components
pub use chart_fetcher::ChartFetcher;
pub use periodic::PeriodicTask;
pub use refresh_state::{QueryView, RefreshState};
pub use series_cache::{SeriesCache, SeriesEntry};
pub use snapshot_fetcher::SnapshotFetcher;
