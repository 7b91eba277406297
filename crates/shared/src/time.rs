//! Timestamp display helpers.

use chrono::{DateTime, Local, NaiveDateTime};

/// Render a server timestamp as e.g. `May 1, 2024, 10:00`.
///
/// Accepts RFC 3339 (converted to local time) and the offset-less
/// `YYYY-MM-DDTHH:MM:SS[.fff]` form the forum service emits. Anything else
/// renders as `Invalid time`.
pub fn format_timestamp(raw: &str) -> String {
    const FORMAT: &str = "%b %-d, %Y, %H:%M";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(FORMAT).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(FORMAT).to_string();
    }
    "Invalid time".to_string()
}

/// Render only the clock time (chat bubbles).
pub fn format_clock(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format("%H:%M").to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format("%H:%M").to_string();
    }
    "Invalid time".to_string()
}
