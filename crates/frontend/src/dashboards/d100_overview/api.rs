use chrono::NaiveDate;
use contracts::domain::a001_user::User;
use contracts::domain::a002_schedule::Schedule;
use contracts::domain::a003_booking::Booking;
use contracts::shared::api::ApiError;
use contracts::shared::business_time::business_tz;
use contracts::shared::date_bucket::{aggregate, DateBuckets};
use contracts::shared::list_view::ListRecord;

use crate::domain::a001_user::api::fetch_all_users;
use crate::domain::a002_schedule::api::fetch_schedules;
use crate::domain::a003_booking::api::fetch_bookings;
use crate::shared::cancel::CancelFlag;

pub const REGISTRATION_MONTHS: usize = 6;
pub const BOOKING_DAYS: usize = 7;

/// Everything the overview shows, computed once per load.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewData {
    pub users: usize,
    pub candidates: usize,
    pub schedules: usize,
    pub upcoming_schedules: usize,
    pub bookings: usize,
    pub registrations_by_month: Vec<(String, usize)>,
    pub bookings_by_day: Vec<(String, usize)>,
}

/// `(label, count)` pairs for the last `n` months, oldest first, e.g. `"Jan 2025"`.
pub fn month_series(buckets: &DateBuckets, n: usize, today: NaiveDate) -> Vec<(String, usize)> {
    buckets
        .recent_months(n, today)
        .into_iter()
        .map(|(month, count)| {
            let label = NaiveDate::from_ymd_opt(month.year, month.month, 1)
                .map(|d| d.format("%b %Y").to_string())
                .unwrap_or_else(|| month.to_string());
            (label, count)
        })
        .collect()
}

/// `(label, count)` pairs for the last `n` days, oldest first, e.g. `"05 Jan"`.
pub fn day_series(buckets: &DateBuckets, n: usize, today: NaiveDate) -> Vec<(String, usize)> {
    buckets
        .recent_days(n, today)
        .into_iter()
        .map(|(day, count)| (day.format("%d %b").to_string(), count))
        .collect()
}

pub fn summarize(
    users: &[User],
    schedules: &[Schedule],
    bookings: &[Booking],
    today: NaiveDate,
) -> OverviewData {
    let tz = business_tz();
    let registrations = aggregate(users.iter().filter(|u| u.is_candidate()), &tz);
    let booked = aggregate(bookings, &tz);
    let upcoming_schedules = schedules
        .iter()
        .filter(|s| s.list_date().is_some_and(|d| d >= today))
        .count();

    OverviewData {
        users: users.len(),
        candidates: users.iter().filter(|u| u.is_candidate()).count(),
        schedules: schedules.len(),
        upcoming_schedules,
        bookings: bookings.len(),
        registrations_by_month: month_series(&registrations, REGISTRATION_MONTHS, today),
        bookings_by_day: day_series(&booked, BOOKING_DAYS, today),
    }
}

/// Loads all three collections. `Ok(None)` when cancelled mid-walk.
pub async fn load_overview(
    cancel: &CancelFlag,
    today: NaiveDate,
) -> Result<Option<OverviewData>, ApiError> {
    let Some(users) = fetch_all_users(None, cancel).await? else {
        return Ok(None);
    };
    let schedules = fetch_schedules().await?;
    let bookings = fetch_bookings().await?;
    if cancel.is_cancelled() {
        return Ok(None);
    }
    log::info!(
        "overview: {} users, {} schedules, {} bookings",
        users.len(),
        schedules.len(),
        bookings.len()
    );
    Ok(Some(summarize(&users, &schedules, &bookings, today)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn user(id: &str, created: &str, role: &str) -> User {
        serde_json::from_value(json!({"_id": id, "name": id, "createdAt": created, "role": role})).unwrap()
    }

    fn booking(id: &str, created: &str) -> Booking {
        serde_json::from_value(json!({"_id": id, "bookingDate": "2025-03-20", "createdAt": created})).unwrap()
    }

    #[test]
    fn summarizes_counts_and_series() {
        let users = vec![
            user("u1", "2025-01-10T05:00:00Z", "user"),
            user("u2", "2025-03-01T02:00:00Z", "user"),
            user("u3", "2025-03-02T02:00:00Z", "admin"),
        ];
        let bookings = vec![
            booking("b1", "2025-03-14T20:00:00Z"), // 15 Mar in Dhaka
            booking("b2", "2025-03-15T08:00:00Z"),
        ];
        let data = summarize(&users, &[], &bookings, d("2025-03-15"));

        assert_eq!(data.users, 3);
        assert_eq!(data.candidates, 2);
        assert_eq!(data.bookings, 2);
        assert_eq!(data.registrations_by_month.len(), REGISTRATION_MONTHS);
        assert_eq!(data.registrations_by_month.last(), Some(&("Mar 2025".to_string(), 1)));
        assert!(data.registrations_by_month.contains(&("Jan 2025".to_string(), 1)));
        assert_eq!(data.bookings_by_day.len(), BOOKING_DAYS);
        assert_eq!(data.bookings_by_day.last(), Some(&("15 Mar".to_string(), 2)));
        assert_eq!(data.bookings_by_day.first().map(|(_, c)| *c), Some(0));
    }
}
