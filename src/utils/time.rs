//! Time utilities: storage timestamp text, whole-second deltas.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDateTime, TimeDelta};

/// Format written to `tasks.start_time` / `tasks.end_time`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Also accepts fractional seconds, as written by older databases.
const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_PARSE_FORMAT)
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

/// Whole seconds from `from` to `to`, clamped at zero so that a clock
/// stepping backwards never subtracts logged time.
pub fn whole_seconds_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_seconds().max(0)
}

pub fn seconds(secs: i64) -> TimeDelta {
    TimeDelta::seconds(secs)
}
