//! Date display formatting.
//!
//! Item dates are shown in US English long form ("March 15, 2024"). Dates are
//! purely presentational: nothing sorts or compares them, so unparseable input
//! renders as [`INVALID_DATE`] instead of failing the render.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Display text for a date that could not be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Local datetime layouts accepted in addition to RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts, ISO first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

/// Format an ISO-ish date string as `Month D, YYYY`.
///
/// Offsets in full timestamps are not converted; the calendar date written in
/// the string is the one displayed.
pub fn format_date(input: &str) -> String {
    match parse_date(input.trim()) {
        Some(date) => format_naive(date),
        None => INVALID_DATE.to_string(),
    }
}

/// Format a Unix timestamp in milliseconds (UTC) as `Month D, YYYY`.
pub fn format_epoch_millis(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) => format_naive(dt.date_naive()),
        None => INVALID_DATE.to_string(),
    }
}

/// Year printed without padding, as en-US long dates show it.
fn format_naive(date: NaiveDate) -> String {
    format!("{} {}, {}", date.format("%B"), date.day(), date.year())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
}
