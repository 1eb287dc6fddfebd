// File: ./src/model/format.rs
// Display labels for times and dates
use chrono::{NaiveDate, NaiveTime};

/// Parses "HH:MM" (or "H:MM") into a time of day.
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").ok()
}

/// Parses an ISO "YYYY-MM-DD" calendar date.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

/// "13:05" -> "1:05 PM". Midnight shows as 12 AM, noon as 12 PM.
///
/// Anything that is not "hours:minutes" is handed back untouched.
pub fn format_time(time: &str) -> String {
    let Some((hours, minutes)) = time.split_once(':') else {
        return time.to_string();
    };
    let Ok(hour) = hours.trim().parse::<u32>() else {
        return time.to_string();
    };
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{} {}", display_hour, minutes, suffix)
}

/// "Wed, Jan 1, 2025"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}
