use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Lookback window for the price chart.
///
/// The set is closed: every variant maps to a fixed `days` value understood by
/// the market-chart endpoint, so an unknown timeframe cannot reach the fetch
/// layer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, Serialize, Deserialize,
)]
pub enum Timeframe {
    #[strum(serialize = "6h")]
    SixHours,
    #[strum(serialize = "1d")]
    OneDay,
    #[default]
    #[strum(serialize = "7d")]
    SevenDays,
    #[strum(serialize = "1m")]
    OneMonth,
}

impl Timeframe {
    /// Value of the `days` query parameter.
    pub const fn days_param(self) -> &'static str {
        match self {
            Timeframe::SixHours => "0.25",
            Timeframe::OneDay => "1",
            Timeframe::SevenDays => "7",
            Timeframe::OneMonth => "30",
        }
    }

    /// Lookback window in days.
    pub const fn lookback_days(self) -> f64 {
        match self {
            Timeframe::SixHours => 0.25,
            Timeframe::OneDay => 1.0,
            Timeframe::SevenDays => 7.0,
            Timeframe::OneMonth => 30.0,
        }
    }

    /// Button caption, e.g. "7D"
    pub fn button_label(self) -> String {
        self.to_string().to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn days_table_is_fixed() {
        let table: Vec<(Timeframe, &str)> = Timeframe::iter().map(|t| (t, t.days_param())).collect();
        assert_eq!(
            table,
            vec![
                (Timeframe::SixHours, "0.25"),
                (Timeframe::OneDay, "1"),
                (Timeframe::SevenDays, "7"),
                (Timeframe::OneMonth, "30"),
            ]
        );
    }

    #[test]
    fn mapping_is_stable_across_calls() {
        for timeframe in Timeframe::iter() {
            let first = timeframe.days_param();
            for _ in 0..3 {
                assert_eq!(timeframe.days_param(), first);
            }
            assert_eq!(first.parse::<f64>().ok(), Some(timeframe.lookback_days()));
        }
    }

    #[test]
    fn default_is_seven_days() {
        assert_eq!(Timeframe::default(), Timeframe::SevenDays);
    }

    #[test]
    fn labels_match_selector_captions() {
        let labels: Vec<String> = Timeframe::iter().map(|t| t.to_string()).collect();
        assert_eq!(labels, ["6h", "1d", "7d", "1m"]);
        assert_eq!(Timeframe::OneMonth.button_label(), "1M");
    }
}
