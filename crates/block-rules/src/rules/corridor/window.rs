use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Number of days after today that still count as short notice.
pub const URGENT_WINDOW_DAYS: i64 = 2;

/// Position of a requested block date relative to "today" (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateWindow {
    UrgentWindow,
    CurrentWeek,
    NextWeek,
    Beyond,
    Elapsed,
}

impl DateWindow {
    pub const fn label(self) -> &'static str {
        match self {
            Self::UrgentWindow => "Within 2 days",
            Self::CurrentWeek => "Current week",
            Self::NextWeek => "Next week",
            Self::Beyond => "Beyond next week",
            Self::Elapsed => "Elapsed",
        }
    }
}

/// Whole days between today's UTC midnight and the target's UTC midnight.
pub fn days_from_today(target: NaiveDate, now: DateTime<Utc>) -> i64 {
    target.signed_duration_since(now.date_naive()).num_days()
}

pub fn is_within_urgent_window(target: NaiveDate, now: DateTime<Utc>) -> bool {
    (0..=URGENT_WINDOW_DAYS).contains(&days_from_today(target, now))
}

pub fn is_in_current_calendar_week(target: NaiveDate, now: DateTime<Utc>) -> bool {
    let monday = week_start(now.date_naive());
    target >= monday && target <= monday + Duration::days(6)
}

pub fn is_in_next_calendar_week(target: NaiveDate, now: DateTime<Utc>) -> bool {
    let next_monday = week_start(now.date_naive()) + Duration::days(7);
    target >= next_monday && target <= next_monday + Duration::days(6)
}

pub fn classify(target: NaiveDate, now: DateTime<Utc>) -> DateWindow {
    if is_within_urgent_window(target, now) {
        DateWindow::UrgentWindow
    } else if is_in_current_calendar_week(target, now) {
        DateWindow::CurrentWeek
    } else if is_in_next_calendar_week(target, now) {
        DateWindow::NextWeek
    } else if days_from_today(target, now) < 0 {
        DateWindow::Elapsed
    } else {
        DateWindow::Beyond
    }
}

/// Monday of the ISO week containing `day`.
fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}

/// Parses a caller-supplied block date. Accepts `YYYY-MM-DD` or an RFC 3339 timestamp,
/// in which case the UTC calendar date is used.
pub fn parse_target_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

pub fn is_within_urgent_window_raw(raw: &str, now: DateTime<Utc>) -> bool {
    parse_target_date(raw).is_some_and(|target| is_within_urgent_window(target, now))
}

pub fn is_in_current_calendar_week_raw(raw: &str, now: DateTime<Utc>) -> bool {
    parse_target_date(raw).is_some_and(|target| is_in_current_calendar_week(target, now))
}

pub fn is_in_next_calendar_week_raw(raw: &str, now: DateTime<Utc>) -> bool {
    parse_target_date(raw).is_some_and(|target| is_in_next_calendar_week(target, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0)
            .single()
            .expect("valid instant")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn days_from_today_ignores_time_of_day() {
        let late = at(2025, 1, 15, 23, 59);
        assert_eq!(days_from_today(date(2025, 1, 15), late), 0);
        assert_eq!(days_from_today(date(2025, 1, 16), late), 1);
        assert_eq!(days_from_today(date(2025, 1, 13), late), -2);
    }

    #[test]
    fn urgent_window_spans_today_and_the_next_two_days() {
        let now = at(2025, 1, 15, 8, 0);
        assert!(is_within_urgent_window(date(2025, 1, 15), now));
        assert!(is_within_urgent_window(date(2025, 1, 17), now));
        assert!(!is_within_urgent_window(date(2025, 1, 18), now));
        assert!(!is_within_urgent_window(date(2025, 1, 14), now));
    }

    #[test]
    fn weeks_run_monday_to_sunday() {
        // Sunday 2025-01-19 still belongs to the week starting Monday 2025-01-13.
        let sunday = at(2025, 1, 19, 12, 0);
        assert!(is_in_current_calendar_week(date(2025, 1, 13), sunday));
        assert!(is_in_current_calendar_week(date(2025, 1, 19), sunday));
        assert!(is_in_next_calendar_week(date(2025, 1, 20), sunday));
        assert!(is_in_next_calendar_week(date(2025, 1, 26), sunday));
        assert!(!is_in_next_calendar_week(date(2025, 1, 27), sunday));
    }

    #[test]
    fn next_week_crosses_year_boundary() {
        let now = at(2024, 12, 31, 10, 0);
        assert!(is_in_current_calendar_week(date(2025, 1, 5), now));
        assert!(is_in_next_calendar_week(date(2025, 1, 6), now));
    }

    #[test]
    fn classify_prefers_urgent_window() {
        let saturday = at(2025, 1, 18, 9, 0);
        assert_eq!(classify(date(2025, 1, 20), saturday), DateWindow::UrgentWindow);
        assert_eq!(classify(date(2025, 1, 22), saturday), DateWindow::NextWeek);
        assert_eq!(classify(date(2025, 1, 14), saturday), DateWindow::CurrentWeek);
        assert_eq!(classify(date(2025, 1, 10), saturday), DateWindow::Elapsed);
        assert_eq!(classify(date(2025, 2, 3), saturday), DateWindow::Beyond);
    }

    #[test]
    fn malformed_dates_fall_outside_every_window() {
        let now = at(2025, 1, 15, 8, 0);
        for raw in ["", "15/01/2025", "2025-13-01", "tomorrow"] {
            assert!(!is_within_urgent_window_raw(raw, now), "{raw}");
            assert!(!is_in_current_calendar_week_raw(raw, now), "{raw}");
            assert!(!is_in_next_calendar_week_raw(raw, now), "{raw}");
        }
    }

    #[test]
    fn parses_rfc3339_using_the_utc_date() {
        assert_eq!(
            parse_target_date("2025-01-16T02:00:00+05:30"),
            Some(date(2025, 1, 15))
        );
        assert_eq!(parse_target_date(" 2025-01-16 "), Some(date(2025, 1, 16)));
    }
}
