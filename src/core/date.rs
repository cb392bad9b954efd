//! Date formatting with `YYYY`/`MM`/`DD`/`HH`/`mm` tokens.

use chrono::{DateTime, Datelike, Days, Local, LocalResult, TimeDelta, TimeZone, Timelike};

use crate::core::error::DateError;

pub use crate::config::DEFAULT_DATE_PATTERN as DEFAULT_PATTERN;

/// Substitute the first occurrence of each token in `pattern`.
///
/// Tokens are replaced in the order `YYYY`, `MM`, `DD`, `HH`, `mm`; a token
/// repeated in the pattern is only substituted once.
pub fn format<D: Datelike + Timelike>(date: &D, pattern: &str) -> String {
    pattern
        .replacen("YYYY", &date.year().to_string(), 1)
        .replacen("MM", &format!("{:02}", date.month()), 1)
        .replacen("DD", &format!("{:02}", date.day()), 1)
        .replacen("HH", &format!("{:02}", date.hour()), 1)
        .replacen("mm", &format!("{:02}", date.minute()), 1)
}

/// Format a Unix timestamp in milliseconds in the host's local time zone.
pub fn format_millis(millis: i64, pattern: &str) -> Result<String, DateError> {
    let date = Local
        .timestamp_millis_opt(millis)
        .single()
        .ok_or(DateError::OutOfRange(millis))?;
    Ok(format(&date, pattern))
}

/// The same wall-clock time `days` calendar days before `now`.
///
/// Month and year boundaries follow the calendar. A negative `days` moves
/// forward. When the target wall-clock time does not exist in the zone
/// (a DST gap) the result falls back to exact 24-hour steps; out-of-range
/// shifts return `now` unchanged.
pub fn days_before<Tz: TimeZone>(now: &DateTime<Tz>, days: i64) -> DateTime<Tz> {
    let local = now.naive_local();
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        local.checked_sub_days(step)
    } else {
        local.checked_add_days(step)
    };

    let resolved = shifted.and_then(|naive| match now.timezone().from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => None,
    });

    resolved
        .or_else(|| TimeDelta::try_days(days).and_then(|delta| now.clone().checked_sub_signed(delta)))
        .unwrap_or_else(|| now.clone())
}

/// The current local time moved back `days` calendar days.
pub fn days_ago(days: i64) -> DateTime<Local> {
    days_before(&Local::now(), days)
}
