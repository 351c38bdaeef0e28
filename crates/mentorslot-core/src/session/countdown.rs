use chrono::{DateTime, Utc};

const MS_PER_MINUTE: i64 = 60_000;

/// Whole minutes until `later`, rounded up and never below one.
fn minutes_until(now: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let ms = (later - now).num_milliseconds().max(0);
    ((ms + MS_PER_MINUTE - 1) / MS_PER_MINUTE).max(1)
}

/// Countdown text for a session list.
///
/// Before the start: `starts in Nm`, or `starts in Nh` from an hour out
/// (whole hours, rounded down). During: `ends in Nm`. After: `Ended`.
pub fn time_label(now: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    if now < start {
        let minutes = minutes_until(now, start);
        if minutes >= 60 {
            format!("starts in {}h", minutes / 60)
        } else {
            format!("starts in {minutes}m")
        }
    } else if now < end {
        format!("ends in {}m", minutes_until(now, end))
    } else {
        "Ended".to_string()
    }
}
