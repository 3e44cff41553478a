//! Date and time-of-day helpers
//!
//! Stored times are local `HH:MM` strings, so window bounds are produced
//! in the same format and compared lexicographically by the store.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// Hours before "now" that still count for the current-events window
pub const WINDOW_BEFORE_HOURS: i64 = 2;

/// Hours after "now" covered by the current-events window
pub const WINDOW_AFTER_HOURS: i64 = 6;

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current local date and time
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Format a timestamp's time of day as `HH:MM`
pub fn format_hhmm(at: NaiveDateTime) -> String {
    at.format("%H:%M").to_string()
}

/// `(start, end)` as `HH:MM`, clamped to the day of `now`
///
/// A start that would fall on the previous day becomes `00:00` and an end
/// on the next day becomes `23:59`, so string comparison stays meaningful.
pub fn window_around(now: NaiveDateTime, before: Duration, after: Duration) -> (String, String) {
    let start = now - before;
    let end = now + after;

    let start = if start.date() < now.date() {
        "00:00".to_string()
    } else {
        format_hhmm(start)
    };
    let end = if end.date() > now.date() {
        "23:59".to_string()
    } else {
        format_hhmm(end)
    };

    (start, end)
}

/// The current-events window: two hours back, six hours ahead
pub fn current_window(now: NaiveDateTime) -> (String, String) {
    window_around(
        now,
        Duration::hours(WINDOW_BEFORE_HOURS),
        Duration::hours(WINDOW_AFTER_HOURS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_window_midday() {
        assert_eq!(current_window(at(14, 5)), ("12:05".to_string(), "20:05".to_string()));
    }

    #[test]
    fn test_window_clamps_to_day() {
        assert_eq!(current_window(at(1, 0)), ("00:00".to_string(), "07:00".to_string()));
        assert_eq!(current_window(at(20, 30)), ("18:30".to_string(), "23:59".to_string()));
    }

    #[test]
    fn test_format_hhmm_pads() {
        assert_eq!(format_hhmm(at(7, 3)), "07:03");
    }
}
