pub mod app_time;
pub mod time_utils;

pub use app_time::{AppInstant, Clock, ManualClock, SystemClock, now};
pub use time_utils::TimeUtils;
