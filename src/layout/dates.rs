use crate::ir::{Instant, Timeline};
use chrono::{NaiveDate, NaiveTime};

const MILLIS_PER_DAY: i64 = 86_400_000;

pub fn reference_instant(date: NaiveDate) -> Instant {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Whole days from `at` to `reference`, rounded up. Negative when `at` lies
/// after the reference.
pub fn days_between(reference: Instant, at: Instant) -> i64 {
    let millis = (reference - at).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) != 0 {
        days + 1
    } else {
        days
    }
}

/// Days-ago of an instant, never below 1 so the logarithm stays defined.
pub fn days_ago(reference: Instant, at: Instant) -> i64 {
    days_between(reference, at).max(1)
}

/// Days-ago of the oldest event; the span every position is scaled against.
pub fn max_days(timeline: &Timeline, reference: Instant) -> i64 {
    let oldest = timeline
        .oldest_date()
        .map_or(reference, |oldest| oldest.min(reference));
    days_between(reference, oldest).max(1)
}
