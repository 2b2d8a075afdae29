use chrono::{DateTime, Datelike, Timelike, Utc};

/// Sunday-based weekday index of Thursday.
const CUTOFF_WEEKDAY: u32 = 4;
const CUTOFF_HOUR: u32 = 22;

/// True once Thursday 22:00 UTC has passed for the week containing `now`.
/// Friday and Saturday are past the cutoff; Sunday starts a fresh cycle.
pub fn has_passed_thursday_cutoff(now: DateTime<Utc>) -> bool {
    let weekday = now.weekday().num_days_from_sunday();
    (weekday == CUTOFF_WEEKDAY && now.hour() >= CUTOFF_HOUR) || weekday > CUTOFF_WEEKDAY
}
