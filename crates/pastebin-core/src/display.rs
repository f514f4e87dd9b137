//! Human-readable date rendering.

use std::fmt;

use chrono::{DateTime, Datelike, TimeZone};

/// English ordinal suffix for a day of the month.
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

/// Render a timestamp like `Monday, 1st December 2014 at 11:00AM`.
///
/// 12-hour clock with a zero-padded hour and no space before AM/PM.
pub fn format_display_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    let day = date.day();
    format!(
        "{}, {}{} {}",
        date.format("%A"),
        day,
        ordinal_suffix(day),
        date.format("%B %Y at %I:%M%p"),
    )
}
