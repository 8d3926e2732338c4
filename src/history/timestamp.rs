//! Chrome stores times as microseconds since 1601-01-01 UTC.

use chrono::{DateTime, Duration, Utc};

/// Seconds between 1601-01-01 and 1970-01-01.
pub const CHROME_EPOCH_OFFSET_SECS: i64 = 11_644_473_600;

const MICROS_PER_SECOND: i64 = 1_000_000;

/// Converts a Chrome timestamp into UTC. Returns `None` only when the value falls outside of
/// what [DateTime] can represent.
pub fn chrome_time_to_utc(chrome_time: i64) -> Option<DateTime<Utc>> {
    let seconds = chrome_time.div_euclid(MICROS_PER_SECOND) - CHROME_EPOCH_OFFSET_SECS;
    let micros = chrome_time.rem_euclid(MICROS_PER_SECOND);
    DateTime::from_timestamp(seconds, (micros * 1_000) as u32)
}

/// Inverse of [chrome_time_to_utc], truncated to microseconds.
pub fn utc_to_chrome_time(time: DateTime<Utc>) -> i64 {
    (time.timestamp() + CHROME_EPOCH_OFFSET_SECS) * MICROS_PER_SECOND
        + i64::from(time.timestamp_subsec_micros())
}

/// A missing or zero `visit_time` means Chrome never recorded one.
pub fn visit_time_from_column(value: Option<i64>) -> Option<DateTime<Utc>> {
    value.filter(|v| *v != 0).and_then(chrome_time_to_utc)
}

/// `visit_duration` is in microseconds. Missing values count as no time spent.
pub fn duration_from_column(value: Option<i64>) -> Duration {
    value
        .filter(|v| *v > 0)
        .map(Duration::microseconds)
        .unwrap_or_else(Duration::zero)
}
