//! Human-readable UTC rendering of webhook timestamps
//!
//! GitHub sends ISO-8601 instants (`2024-01-02T15:30:00Z`, or with a numeric
//! offset for commit timestamps). The feed shows them as
//! `2nd January 2024 - 03:30 PM UTC`.

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

use crate::error::FeedError;

/// Ordinal suffix for a day of the month.
pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Parse an ISO-8601 instant and convert it to UTC.
///
/// Values without an offset are taken to be UTC already.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, FeedError> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| FeedError::FormatError(format!("Unparsable timestamp '{}': {}", raw, e)))
}

pub fn render(instant: DateTime<Utc>) -> String {
    let day = instant.day();
    format!(
        "{}{} {}",
        day,
        ordinal_suffix(day),
        instant.format("%B %Y - %I:%M %p UTC")
    )
}

pub fn format_timestamp(raw: &str) -> Result<String, FeedError> {
    parse_instant(raw).map(render)
}
