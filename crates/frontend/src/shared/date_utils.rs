/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the application
use chrono::{DateTime, TimeZone, Utc};

/// Format a timestamp as DD.MM.YYYY HH:MM:SS
/// Example: 2024-03-15T14:02:26.123Z -> "15.03.2024 14:02:26"
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%d.%m.%Y %H:%M:%S").to_string()
}

/// Format a timestamp as DD.MM.YYYY
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%d.%m.%Y").to_string()
}

/// Short relative form for the notification dropdown
/// Example: "just now", "5 min ago", "3 h ago", "2 d ago"; older than a week gives the date
pub fn format_relative(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let secs = (*now - *then).num_seconds();
    match secs {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => format!("{} min ago", s / 60),
        s if s < 86_400 => format!("{} h ago", s / 3_600),
        s if s < 7 * 86_400 => format!("{} d ago", s / 86_400),
        _ => format_date(then),
    }
}

/// Current time from the browser clock
pub fn now() -> DateTime<Utc> {
    let millis = js_sys::Date::now() as i64;
    Utc.timestamp_millis_opt(millis).single().unwrap_or_else(Utc::now)
}
