//! Refresh cadence and cache configuration

use std::time::Duration;

use crate::domain::Timeframe;

pub struct RefreshConfig {
    /// Cadence of the market snapshot loop
    pub snapshot_interval: Duration,
    /// Cadence of the chart series loop
    pub chart_interval: Duration,
    // Series for a timeframe the user moved away from are evicted after this
    pub inactive_series_ttl: Duration,
    pub default_timeframe: Timeframe,
}

pub const REFRESH: RefreshConfig = RefreshConfig {
    snapshot_interval: Duration::from_secs(20),
    chart_interval: Duration::from_secs(60),
    inactive_series_ttl: Duration::from_secs(5 * 60),
    default_timeframe: Timeframe::SevenDays,
};
