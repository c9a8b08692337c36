use serde::{Deserialize, Serialize};

use super::Timeframe;

/// One point of a historical price series.
/// `timestamp_ms` stays raw epoch milliseconds; labels are made at render time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

/// Cache key of a chart series: one asset, one timeframe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    pub asset_id: String,
    pub timeframe: Timeframe,
}

impl SeriesKey {
    pub fn new(asset_id: impl Into<String>, timeframe: Timeframe) -> Self {
        Self {
            asset_id: asset_id.into(),
            timeframe,
        }
    }
}

impl std::fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.asset_id, self.timeframe)
    }
}

/// Price history for exactly one `SeriesKey`, ascending by timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub key: SeriesKey,
    pub points: Vec<PricePoint>,
}

impl ChartSeries {
    /// Builds a series, sorting points by timestamp.
    pub fn new(key: SeriesKey, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp_ms);
        Self { key, points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// (min, max) price, or None for an empty series
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, p| match acc {
            None => Some((p.price, p.price)),
            Some((lo, hi)) => Some((lo.min(p.price), hi.max(p.price))),
        })
    }

    /// (first, last) timestamp, or None for an empty series
    pub fn time_range(&self) -> Option<(i64, i64)> {
        Some((self.points.first()?.timestamp_ms, self.points.last()?.timestamp_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(timestamp_ms: i64, price: f64) -> PricePoint {
        PricePoint {
            timestamp_ms,
            price,
        }
    }

    #[test]
    fn points_are_sorted_on_construction() {
        let key = SeriesKey::new("bitcoin", Timeframe::OneDay);
        let series = ChartSeries::new(key, vec![point(30, 3.0), point(10, 1.0), point(20, 2.0)]);
        let stamps: Vec<i64> = series.points.iter().map(|p| p.timestamp_ms).collect();
        assert_eq!(stamps, [10, 20, 30]);
        assert_eq!(series.time_range(), Some((10, 30)));
    }

    #[test]
    fn price_range_spans_all_points() {
        let key = SeriesKey::new("bitcoin", Timeframe::SevenDays);
        let series = ChartSeries::new(key.clone(), vec![point(1, 64_000.0), point(2, 66_500.5), point(3, 63_250.0)]);
        assert_eq!(series.price_range(), Some((63_250.0, 66_500.5)));

        let empty = ChartSeries::new(key, Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.price_range(), None);
        assert_eq!(empty.time_range(), None);
    }

    #[test]
    fn key_display_names_asset_and_timeframe() {
        assert_eq!(SeriesKey::new("bitcoin", Timeframe::SixHours).to_string(), "bitcoin@6h");
    }
}
