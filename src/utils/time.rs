use chrono::{DateTime, Duration, Local, Utc};

pub const UNKNOWN_RECENCY: &str = "Unknown time";

/// Describes how long ago `time` was, using the coarsest unit that still says something: days
/// once a full day has passed, otherwise seconds under a minute, minutes under an hour, then
/// hours. Times in the future count as "0 seconds ago".
pub fn format_recency(time: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(time) = time else {
        return UNKNOWN_RECENCY.to_string();
    };

    let delta = (now - time).max(Duration::zero());

    if delta.num_days() > 0 {
        format!("{} days ago", delta.num_days())
    } else if delta.num_seconds() < 60 {
        format!("{} seconds ago", delta.num_seconds())
    } else if delta.num_seconds() < 3600 {
        format!("{} minutes ago", delta.num_minutes())
    } else {
        format!("{} hours ago", delta.num_hours())
    }
}

/// Local wall-clock rendering used by the history report.
pub fn format_visit_time(time: Option<DateTime<Utc>>) -> String {
    match time {
        Some(time) => time
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "Unknown".to_string(),
    }
}
