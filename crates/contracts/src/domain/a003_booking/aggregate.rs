use crate::domain::a002_schedule::TestType;
use crate::shared::api::null_as_default;
use crate::shared::business_time::parse_loose_date;
use crate::shared::date_bucket::CreationInstant;
use crate::shared::list_view::ListRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// References
// ============================================================================

/// A related record that the API sends either as a bare id or populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Id(String),
    Populated(T),
}

impl<T> Default for Ref<T> {
    fn default() -> Self {
        Ref::Id(String::new())
    }
}

impl<T> Ref<T> {
    pub fn populated(&self) -> Option<&T> {
        match self {
            Ref::Populated(v) => Some(v),
            Ref::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, alias = "contactNumber", deserialize_with = "null_as_default")]
    pub contact_no: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub course_name: String,
    #[serde(default)]
    pub test_type: Option<TestType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_date: String,
}

impl Ref<UserSummary> {
    pub fn id(&self) -> &str {
        match self {
            Ref::Id(id) => id,
            Ref::Populated(u) => &u.id,
        }
    }
}

impl Ref<ScheduleSummary> {
    pub fn id(&self) -> &str {
        match self {
            Ref::Id(id) => id,
            Ref::Populated(s) => &s.id,
        }
    }
}

// ============================================================================
// Enumerations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingLocation {
    Home,
    #[default]
    TestCenter,
}

impl BookingLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingLocation::Home => "Home",
            BookingLocation::TestCenter => "Test-Center",
        }
    }
}

impl From<String> for BookingLocation {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("home") {
            BookingLocation::Home
        } else {
            BookingLocation::TestCenter
        }
    }
}

impl From<BookingLocation> for String {
    fn from(value: BookingLocation) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Rescheduled,
    Cancelled,
    Completed,
    Other(String),
}

impl BookingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Rescheduled => "rescheduled",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
            BookingStatus::Other(s) => s,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }
}

impl From<String> for BookingStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" | "booked" => BookingStatus::Pending,
            "confirmed" => BookingStatus::Confirmed,
            "rescheduled" => BookingStatus::Rescheduled,
            "cancelled" | "canceled" => BookingStatus::Cancelled,
            "completed" => BookingStatus::Completed,
            _ => BookingStatus::Other(value),
        }
    }
}

impl From<BookingStatus> for String {
    fn from(value: BookingStatus) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Attendance {
    #[default]
    NotMarked,
    Present,
    Absent,
}

impl Attendance {
    pub fn as_str(self) -> &'static str {
        match self {
            Attendance::NotMarked => "not-marked",
            Attendance::Present => "present",
            Attendance::Absent => "absent",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Attendance::NotMarked => "Not marked",
            Attendance::Present => "Present",
            Attendance::Absent => "Absent",
        }
    }
}

impl From<String> for Attendance {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "present" | "attended" => Attendance::Present,
            "absent" => Attendance::Absent,
            _ => Attendance::NotMarked,
        }
    }
}

impl From<Attendance> for String {
    fn from(value: Attendance) -> Self {
        value.as_str().to_string()
    }
}

// ============================================================================
// Aggregate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, alias = "userId", deserialize_with = "null_as_default")]
    pub user: Ref<UserSummary>,
    #[serde(default, alias = "scheduleId", deserialize_with = "null_as_default")]
    pub schedule: Ref<ScheduleSummary>,
    #[serde(default, alias = "date", deserialize_with = "null_as_default")]
    pub booking_date: String,
    #[serde(default, alias = "time", alias = "startTime", deserialize_with = "null_as_default")]
    pub booking_time: String,
    #[serde(default, alias = "slotId")]
    pub time_slot_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: BookingLocation,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: BookingStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attendance: Attendance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Booking {
    pub fn date(&self) -> Option<NaiveDate> {
        parse_loose_date(&self.booking_date).or_else(|| {
            self.schedule
                .populated()
                .and_then(|s| parse_loose_date(&s.start_date))
        })
    }

    pub fn course_name(&self) -> &str {
        self.schedule
            .populated()
            .map(|s| s.course_name.as_str())
            .unwrap_or("")
    }

    pub fn test_type(&self) -> Option<TestType> {
        self.schedule.populated().and_then(|s| s.test_type)
    }

    pub fn candidate_name(&self) -> &str {
        self.user.populated().map(|u| u.name.as_str()).unwrap_or("")
    }

    /// Open bookings dated today or later can move to another slot.
    pub fn can_reschedule(&self, today: NaiveDate) -> bool {
        !self.status.is_closed() && self.date().is_some_and(|d| d >= today)
    }
}

impl ListRecord for Booking {
    fn field(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            "location" => Some(self.location.as_str().to_string()),
            "attendance" => Some(self.attendance.as_str().to_string()),
            "courseName" => Some(self.course_name().to_string()),
            "testType" => self.test_type().map(|t| t.as_str().to_string()),
            "user" => Some(self.user.id().to_string()),
            _ => None,
        }
    }

    fn list_date(&self) -> Option<NaiveDate> {
        self.date()
    }

    fn search_text(&self) -> Vec<String> {
        let mut out = vec![self.course_name().to_string()];
        if let Some(u) = self.user.populated() {
            out.push(u.name.clone());
            out.push(u.email.clone());
            out.push(u.contact_no.clone());
        }
        out
    }
}

impl CreationInstant for Booking {
    fn created_at_raw(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    fn object_id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn booking(json: &str) -> Booking {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn accepts_populated_and_bare_references() {
        let populated = booking(
            r#"{"_id": "b1",
                "user": {"_id": "u1", "name": "Rahim", "email": "r@x.io"},
                "schedule": {"_id": "s1", "courseName": "IELTS", "testType": "Paper-Based", "startDate": "2025-07-01"},
                "location": "Home", "status": "confirmed", "attendance": "present"}"#,
        );
        assert_eq!(populated.user.id(), "u1");
        assert_eq!(populated.candidate_name(), "Rahim");
        assert_eq!(populated.course_name(), "IELTS");
        assert_eq!(populated.location, BookingLocation::Home);
        assert_eq!(populated.attendance, Attendance::Present);
        assert_eq!(populated.date(), Some(d("2025-07-01")));

        let bare = booking(r#"{"_id": "b2", "user": "u2", "schedule": "s2", "bookingDate": "2025-07-03"}"#);
        assert_eq!(bare.user.id(), "u2");
        assert_eq!(bare.schedule.id(), "s2");
        assert_eq!(bare.course_name(), "");
        assert_eq!(bare.status, BookingStatus::Pending);
        assert_eq!(bare.location, BookingLocation::TestCenter);
        assert_eq!(bare.field("testType"), None);
    }

    #[test]
    fn null_references_fall_back_to_empty_ids() {
        let b = booking(
            r#"{"_id": "b1", "user": null, "schedule": null, "bookingDate": null, "status": null}"#,
        );
        assert_eq!(b.user.id(), "");
        assert_eq!(b.schedule.id(), "");
        assert_eq!(b.candidate_name(), "");
        assert_eq!(b.status, BookingStatus::default());
        assert_eq!(b.date(), None);
    }

    #[test]
    fn populated_reference_with_null_fields_still_decodes() {
        let b = booking(
            r#"{"_id": "b2",
                "user": {"_id": "u1", "name": "Nusrat", "email": null},
                "schedule": {"_id": "s1", "courseName": "IELTS", "startDate": null}}"#,
        );
        assert_eq!(b.candidate_name(), "Nusrat");
        assert_eq!(b.course_name(), "IELTS");
        assert_eq!(b.date(), None);
    }

    #[test]
    fn unknown_status_passes_through() {
        let b = booking(r#"{"_id": "b3", "status": "on-hold"}"#);
        assert_eq!(b.status, BookingStatus::Other("on-hold".into()));
        assert_eq!(b.field("status").as_deref(), Some("on-hold"));
    }

    #[test]
    fn reschedule_only_for_open_future_bookings() {
        let today = d("2025-07-02");
        let mut b = booking(r#"{"_id": "b4", "bookingDate": "2025-07-02", "status": "confirmed"}"#);
        assert!(b.can_reschedule(today));

        b.booking_date = "2025-07-01".into();
        assert!(!b.can_reschedule(today));

        b.booking_date = "2025-07-05".into();
        b.status = BookingStatus::Cancelled;
        assert!(!b.can_reschedule(today));
        b.status = BookingStatus::Completed;
        assert!(!b.can_reschedule(today));

        b.status = BookingStatus::Pending;
        b.booking_date = "tbd".into();
        assert!(!b.can_reschedule(today));
    }

    #[test]
    fn search_covers_candidate_fields() {
        let b = booking(
            r#"{"_id": "b5", "user": {"_id": "u", "name": "Karim", "email": "k@x.io", "contactNo": "0171"},
                "schedule": {"courseName": "TOEFL"}}"#,
        );
        let text = b.search_text();
        assert!(text.contains(&"Karim".to_string()));
        assert!(text.contains(&"0171".to_string()));
        assert!(text.contains(&"TOEFL".to_string()));
    }
}
