//! Business clock: every "today", day bucket and date comparison in the portal
//! is evaluated in one fixed zone so that staff in different locations see the
//! same lists and the same dashboard numbers.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

/// IANA name of the business time zone (shown in dashboard captions).
pub const BUSINESS_TZ_NAME: &str = "Asia/Dhaka";

/// Asia/Dhaka has observed a constant UTC+06:00 since 2009.
pub const BUSINESS_UTC_OFFSET_SECS: i32 = 6 * 3600;

/// Fixed offset of the business time zone.
pub fn business_tz() -> FixedOffset {
    match FixedOffset::east_opt(BUSINESS_UTC_OFFSET_SECS) {
        Some(tz) => tz,
        None => Utc.fix(),
    }
}

/// Calendar date of `now` in the business time zone.
pub fn today_in_business_tz(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&business_tz()).date_naive()
}

/// Lenient date parser used by list filters.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted to the business-local
/// date) and offset-less `YYYY-MM-DDTHH:MM:SS[.fff]`. Returns `None` for
/// anything else so callers can treat the record as "not matched".
pub fn parse_loose_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&business_tz()).date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ndt| ndt.date())
}

/// Lenient instant parser used for creation timestamps.
///
/// Offset-less values (date-time or bare date) are read as business-local time.
pub fn parse_loose_instant(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    business_tz()
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Creation instant embedded in a 24-hex-digit time-ordered identifier.
///
/// The first four bytes are big-endian seconds since the Unix epoch.
pub fn object_id_instant(id: &str) -> Option<DateTime<Utc>> {
    let id = id.trim();
    if id.len() != 24 || !id.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let secs = u32::from_str_radix(id.get(..8)?, 16).ok()?;
    DateTime::from_timestamp(i64::from(secs), 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn today_rolls_over_at_local_midnight() {
        // 18:30 UTC is already 00:30 the next day in Dhaka
        assert_eq!(
            today_in_business_tz(utc("2025-05-31T18:30:00Z")),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
        assert_eq!(
            today_in_business_tz(utc("2025-05-31T17:59:59Z")),
            NaiveDate::from_ymd_opt(2025, 5, 31).unwrap()
        );
    }

    #[test]
    fn parses_supported_date_shapes() {
        let june_1 = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(parse_loose_date("2025-06-01"), Some(june_1));
        assert_eq!(parse_loose_date(" 2025-06-01 "), Some(june_1));
        assert_eq!(parse_loose_date("2025-06-01T10:00:00"), Some(june_1));
        assert_eq!(parse_loose_date("2025-05-31T18:00:00.000Z"), Some(june_1));
    }

    #[test]
    fn malformed_dates_are_none() {
        assert_eq!(parse_loose_date(""), None);
        assert_eq!(parse_loose_date("01/06/2025"), None);
        assert_eq!(parse_loose_date("2025-13-01"), None);
        assert_eq!(parse_loose_date("tomorrow"), None);
    }

    #[test]
    fn bare_dates_are_local_midnight() {
        assert_eq!(
            parse_loose_instant("2025-01-05"),
            Some(utc("2025-01-04T18:00:00Z"))
        );
        assert_eq!(
            parse_loose_instant("2025-01-05T12:00:00Z"),
            Some(utc("2025-01-05T12:00:00Z"))
        );
        assert_eq!(parse_loose_instant("n/a"), None);
    }

    #[test]
    fn decodes_object_id_timestamp() {
        // 0x65000000 = 1694498816
        assert_eq!(
            object_id_instant("65000000aaaaaaaaaaaaaaaa"),
            DateTime::from_timestamp(1_694_498_816, 0)
        );
        assert_eq!(object_id_instant("65000000"), None);
        assert_eq!(object_id_instant("zz000000aaaaaaaaaaaaaaaa"), None);
    }
}
