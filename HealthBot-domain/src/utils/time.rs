//! Best-effort parsing and display formatting of reminder times.

use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Format used for timestamps stored in the database
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format used when showing timestamps to users
pub const DISPLAY_FORMAT: &str = "%b %d, %Y at %I:%M %p";

static RELATIVE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"in\s+(\d+)\s*(minute|hour|day)").expect("relative time pattern is valid")
});

/// Time-of-day formats, anchored to the reference date
const TIME_FORMATS: &[&str] = &["%H:%M", "%I:%M %p"];

/// Full date-time formats
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%dT%H:%M",
    STORAGE_FORMAT,
];

/// Parse a time expression relative to the current local time.
///
/// See [`parse_time_at`] for the accepted forms.
pub fn parse_time(input: &str) -> Option<NaiveDateTime> {
    parse_time_at(input, Local::now().naive_local())
}

/// Parse a time expression relative to `now`.
///
/// Accepts `in N minute(s)|hour(s)|day(s)`, a time of day (`14:30`,
/// `2:30 PM`) which lands on `now`'s date, or a full date and time
/// (`2023-10-15 14:30`, `10/15/2023 14:30`, `2023-10-15T14:30`,
/// `2023-10-15 14:30:00`). Anything else yields `None`.
pub fn parse_time_at(input: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let trimmed = input.trim();
    let lowered = trimmed.to_lowercase();

    if lowered.contains("in") {
        if let Some(when) = parse_relative(&lowered, now) {
            return Some(when);
        }
    }

    for format in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(trimmed, format) {
            return Some(now.date().and_time(time));
        }
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
}

fn parse_relative(lowered: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let captures = RELATIVE_TIME.captures(lowered)?;
    let value: i64 = captures[1].parse().ok()?;

    let offset = match &captures[2] {
        "minute" => Duration::try_minutes(value)?,
        "hour" => Duration::try_hours(value)?,
        "day" => Duration::try_days(value)?,
        _ => return None,
    };

    now.checked_add_signed(offset)
}

/// Render a stored `%Y-%m-%d %H:%M:%S` timestamp for display,
/// e.g. `Oct 15, 2023 at 02:30 PM`
pub fn format_timestamp(timestamp: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(timestamp.trim(), STORAGE_FORMAT)
        .ok()
        .map(|dt| format_datetime(&dt))
}

/// Render a date-time for display
pub fn format_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format(DISPLAY_FORMAT).to_string()
}

/// Render a date-time in the storage format
pub fn to_storage_string(datetime: &NaiveDateTime) -> String {
    datetime.format(STORAGE_FORMAT).to_string()
}
