//! Time utilities: sampling times are wall-clock `HH:MM` strings.

use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Normalise `8:5`-style input to `08:05`; `None` when not a time of day.
pub fn normalize_time(t: &str) -> Option<String> {
    parse_time(t).map(|nt| nt.format("%H:%M").to_string())
}
