//! Lab dates are entered on the Shamsi calendar, so they are validated by
//! shape and range only and kept as the `YYYY-MM-DD` text the operator typed.

use chrono::{DateTime, Duration, Local};
use regex::Regex;
use std::sync::LazyLock;

static LAB_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("static regex"));

/// `true` for `YYYY-MM-DD` with month 1..=12 and day 1..=31.
pub fn is_lab_date(s: &str) -> bool {
    let Some(caps) = LAB_DATE.captures(s.trim()) else {
        return false;
    };
    let month: u32 = caps[2].parse().unwrap_or(0);
    let day: u32 = caps[3].parse().unwrap_or(0);
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

pub fn now_rfc3339() -> String {
    Local::now().to_rfc3339()
}

/// Parse a stored `created_at` / `last_updated` timestamp.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Local))
}

/// Start of a trailing window of `days` days ending at `now`.
pub fn window_start(now: DateTime<Local>, days: i64) -> DateTime<Local> {
    now - Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lab_dates_are_checked_by_shape_and_range() {
        assert!(is_lab_date("1403-05-31"));
        assert!(is_lab_date("2025-12-01"));
        assert!(!is_lab_date("1403-13-01"));
        assert!(!is_lab_date("1403-00-10"));
        assert!(!is_lab_date("1403-5-1"));
        assert!(!is_lab_date("yesterday"));
    }

    #[test]
    fn timestamps_round_trip_through_rfc3339() {
        let now = now_rfc3339();
        assert!(parse_timestamp(&now).is_some());
        assert!(parse_timestamp("2025-01-01 10:00").is_none());
    }
}
