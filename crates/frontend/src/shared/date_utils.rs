/// Utilities for date and time formatting
///
/// Dates render as `05 Jan 2025`, times as `2:30 PM`, always in the business
/// time zone. Unparseable input is shown as-is.
use chrono::{NaiveTime, Utc};
use contracts::shared::business_time::{
    business_tz, parse_loose_date, parse_loose_instant, today_in_business_tz,
};

/// Today's date in the business time zone.
pub fn business_today() -> chrono::NaiveDate {
    today_in_business_tz(Utc::now())
}

/// Format a date or timestamp as `DD Mon YYYY`
/// Example: "2025-01-05" or "2025-01-05T10:00:00Z" -> "05 Jan 2025"
pub fn format_date(date_str: &str) -> String {
    match parse_loose_date(date_str) {
        Some(date) => date.format("%d %b %Y").to_string(),
        None => date_str.to_string(),
    }
}

/// Format `HH:MM` (or `HH:MM:SS`) as a 12-hour clock time
/// Example: "14:30" -> "2:30 PM", "00:05" -> "12:05 AM"
pub fn format_time_12h(time_str: &str) -> String {
    let trimmed = time_str.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map(|t| t.format("%-I:%M %p").to_string())
        .unwrap_or_else(|_| time_str.to_string())
}

/// Format a timestamp as `DD Mon YYYY, h:MM AM`
/// Example: "2025-01-05T10:00:00Z" -> "05 Jan 2025, 4:00 PM" (UTC+6)
pub fn format_datetime(datetime_str: &str) -> String {
    match parse_loose_instant(datetime_str) {
        Some(instant) => instant
            .with_timezone(&business_tz())
            .format("%d %b %Y, %-I:%M %p")
            .to_string(),
        None => datetime_str.to_string(),
    }
}

/// Slot range, e.g. "9:00 AM - 12:00 PM"
pub fn format_slot(start: &str, end: &str) -> String {
    format!("{} - {}", format_time_12h(start), format_time_12h(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2025-01-05"), "05 Jan 2025");
        assert_eq!(format_date("2025-01-05T10:00:00.000Z"), "05 Jan 2025");
        // 20:00 UTC is already the next day in Dhaka
        assert_eq!(format_date("2025-01-05T20:00:00Z"), "06 Jan 2025");
    }

    #[test]
    fn test_format_time_12h() {
        assert_eq!(format_time_12h("14:30"), "2:30 PM");
        assert_eq!(format_time_12h("09:05"), "9:05 AM");
        assert_eq!(format_time_12h("00:15"), "12:15 AM");
        assert_eq!(format_time_12h("12:00:00"), "12:00 PM");
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2025-01-05T10:00:00Z"), "05 Jan 2025, 4:00 PM");
    }

    #[test]
    fn test_format_slot() {
        assert_eq!(format_slot("09:00", "12:00"), "9:00 AM - 12:00 PM");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_time_12h("25:99"), "25:99");
    }
}
