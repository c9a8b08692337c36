use chrono::{Local, TimeZone};

pub struct TimeUtils;

impl TimeUtils {
    /// Short month + day, e.g. "Jan 5"
    pub const MONTH_DAY_FORMAT: &str = "%b %-d";
}

/// Chart axis label for an epoch-ms timestamp in the given zone.
/// Returns an empty string for timestamps chrono cannot represent.
pub fn epoch_ms_to_month_day<Tz: TimeZone>(epoch_ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match tz.timestamp_millis_opt(epoch_ms) {
        chrono::LocalResult::Single(dt) => dt.format(TimeUtils::MONTH_DAY_FORMAT).to_string(),
        chrono::LocalResult::Ambiguous(earliest, _) => {
            earliest.format(TimeUtils::MONTH_DAY_FORMAT).to_string()
        }
        chrono::LocalResult::None => String::new(),
    }
}

/// Local-time variant used by the chart; display purposes only
pub fn epoch_ms_to_local_month_day(epoch_ms: i64) -> String {
    epoch_ms_to_month_day(epoch_ms, &Local)
}
