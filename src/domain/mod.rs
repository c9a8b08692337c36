// Domain types and value objects
pub mod asset;
pub mod series;
pub mod timeframe;

// Re-export commonly used types
pub use asset::{AssetSnapshot, TrackedAssets, normalize_snapshots};
pub use series::{ChartSeries, PricePoint, SeriesKey};
pub use timeframe::Timeframe;
