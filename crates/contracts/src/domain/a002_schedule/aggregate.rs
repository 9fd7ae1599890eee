use crate::shared::api::null_as_default;
use crate::shared::business_time::parse_loose_date;
use crate::shared::date_bucket::CreationInstant;
use crate::shared::list_view::ListRecord;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Exams the business sells mock tests for.
pub const COURSES: [&str; 4] = ["IELTS", "TOEFL", "GRE", "PTE"];

// ============================================================================
// Test type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TestType {
    #[default]
    PaperBased,
    ComputerBased,
}

impl TestType {
    pub const ALL: [TestType; 2] = [TestType::PaperBased, TestType::ComputerBased];

    pub fn as_str(self) -> &'static str {
        match self {
            TestType::PaperBased => "Paper-Based",
            TestType::ComputerBased => "Computer-Based",
        }
    }
}

impl From<String> for TestType {
    fn from(value: String) -> Self {
        let v = value.to_ascii_lowercase();
        if v.contains("computer") || v == "cb" || v == "cd" {
            TestType::ComputerBased
        } else {
            TestType::PaperBased
        }
    }
}

impl From<TestType> for String {
    fn from(value: TestType) -> Self {
        value.as_str().to_string()
    }
}

// ============================================================================
// Aggregate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[serde(alias = "_id", default)]
    pub slot_id: String,
    pub start_time: String,
    pub end_time: String,
    /// Seat capacity.
    #[serde(default)]
    pub total_slot: u32,
    /// Seats still free.
    #[serde(default)]
    pub slot: u32,
}

impl TimeSlot {
    pub fn booked(&self) -> u32 {
        self.total_slot.saturating_sub(self.slot)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub course_name: String,
    #[serde(default)]
    pub test_type: TestType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(default, alias = "timeSlot", deserialize_with = "null_as_default")]
    pub time_slots: Vec<TimeSlot>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Schedule {
    pub fn capacity(&self) -> u32 {
        self.time_slots.iter().map(|s| s.total_slot).sum()
    }

    pub fn seats_left(&self) -> u32 {
        self.time_slots.iter().map(|s| s.slot).sum()
    }

    pub fn is_full(&self) -> bool {
        !self.time_slots.is_empty() && self.seats_left() == 0
    }
}

impl ListRecord for Schedule {
    fn field(&self, key: &str) -> Option<String> {
        match key {
            "courseName" => Some(self.course_name.clone()),
            "testType" => Some(self.test_type.as_str().to_string()),
            "status" => Some(self.status.clone()),
            _ => None,
        }
    }

    fn list_date(&self) -> Option<NaiveDate> {
        parse_loose_date(&self.start_date)
    }

    fn search_text(&self) -> Vec<String> {
        vec![self.course_name.clone(), self.status.clone()]
    }
}

impl CreationInstant for Schedule {
    fn created_at_raw(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    fn object_id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

// ============================================================================
// Create form
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTimeSlot {
    pub start_time: String,
    pub end_time: String,
    pub total_slot: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleDto {
    pub course_name: String,
    pub test_type: TestType,
    pub start_date: String,
    pub time_slots: Vec<NewTimeSlot>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleValidationError {
    #[error("Course name is required")]
    MissingCourse,
    #[error("Start date '{0}' is not a valid date")]
    InvalidDate(String),
    #[error("Start date cannot be in the past")]
    DateInPast,
    #[error("Add at least one time slot")]
    NoSlots,
    #[error("Slot {index}: '{value}' is not a HH:MM time")]
    InvalidTime { index: usize, value: String },
    #[error("Slot {index}: start time must be before end time")]
    EmptySlot { index: usize },
    #[error("Slot {index}: capacity must be at least 1")]
    ZeroCapacity { index: usize },
    #[error("Slots {first} and {second} overlap")]
    Overlap { first: usize, second: usize },
}

fn parse_slot_time(index: usize, value: &str) -> Result<NaiveTime, ScheduleValidationError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
        ScheduleValidationError::InvalidTime {
            index,
            value: value.to_string(),
        }
    })
}

impl CreateScheduleDto {
    /// Checks the form before it is posted. Slot indices in errors are 1-based,
    /// matching the form labels.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ScheduleValidationError> {
        if self.course_name.trim().is_empty() {
            return Err(ScheduleValidationError::MissingCourse);
        }
        let date = NaiveDate::parse_from_str(self.start_date.trim(), "%Y-%m-%d")
            .map_err(|_| ScheduleValidationError::InvalidDate(self.start_date.clone()))?;
        if date < today {
            return Err(ScheduleValidationError::DateInPast);
        }
        if self.time_slots.is_empty() {
            return Err(ScheduleValidationError::NoSlots);
        }

        let mut ranges = Vec::with_capacity(self.time_slots.len());
        for (i, slot) in self.time_slots.iter().enumerate() {
            let index = i + 1;
            let start = parse_slot_time(index, &slot.start_time)?;
            let end = parse_slot_time(index, &slot.end_time)?;
            if start >= end {
                return Err(ScheduleValidationError::EmptySlot { index });
            }
            if slot.total_slot == 0 {
                return Err(ScheduleValidationError::ZeroCapacity { index });
            }
            ranges.push((index, start, end));
        }

        for (a, (first, a_start, a_end)) in ranges.iter().enumerate() {
            for (second, b_start, b_end) in ranges.iter().skip(a + 1) {
                if a_start < b_end && b_start < a_end {
                    return Err(ScheduleValidationError::Overlap {
                        first: *first,
                        second: *second,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::ApiEnvelope;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn slot(start: &str, end: &str, seats: u32) -> NewTimeSlot {
        NewTimeSlot {
            start_time: start.into(),
            end_time: end.into(),
            total_slot: seats,
        }
    }

    fn form() -> CreateScheduleDto {
        CreateScheduleDto {
            course_name: "IELTS".into(),
            test_type: TestType::ComputerBased,
            start_date: "2025-06-10".into(),
            time_slots: vec![slot("09:00", "12:00", 20), slot("13:00", "16:00", 15)],
            status: "active".into(),
        }
    }

    #[test]
    fn deserializes_schedule_with_slots() {
        let json = r#"{
            "_id": "6650aa000000000000000001",
            "courseName": "IELTS",
            "testType": "Computer-Based",
            "startDate": "2025-06-10",
            "timeSlots": [
                {"slotId": "s1", "startTime": "09:00", "endTime": "12:00", "totalSlot": 20, "slot": 5},
                {"_id": "s2", "startTime": "13:00", "endTime": "16:00", "totalSlot": 10, "slot": 0}
            ],
            "status": "active"
        }"#;
        let schedule: Schedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.test_type, TestType::ComputerBased);
        assert_eq!(schedule.time_slots[1].slot_id, "s2");
        assert_eq!(schedule.capacity(), 30);
        assert_eq!(schedule.seats_left(), 5);
        assert_eq!(schedule.time_slots[0].booked(), 15);
        assert!(!schedule.is_full());
        assert_eq!(schedule.list_date(), Some(d("2025-06-10")));
        assert_eq!(schedule.field("testType").as_deref(), Some("Computer-Based"));
    }

    #[test]
    fn half_filled_schedule_does_not_fail_the_list() {
        let json = r#"{"data": [
            {"_id": "a", "courseName": "IELTS", "startDate": "2025-06-10", "status": "active"},
            {"_id": "b", "courseName": "IELTS"},
            {"_id": "c", "courseName": null, "startDate": null, "timeSlots": null, "status": null}
        ]}"#;
        let env: ApiEnvelope<Vec<Schedule>> = serde_json::from_str(json).unwrap();
        let schedules = env.into_data().unwrap();
        assert_eq!(schedules.len(), 3);
        assert_eq!(schedules[0].list_date(), Some(d("2025-06-10")));
        assert_eq!(schedules[1].start_date, "");
        assert_eq!(schedules[1].list_date(), None);
        assert_eq!(schedules[2].course_name, "");
        assert!(schedules[2].time_slots.is_empty());
    }

    #[test]
    fn test_type_parsing_is_lenient() {
        assert_eq!(TestType::from("computer based".to_string()), TestType::ComputerBased);
        assert_eq!(TestType::from("Paper-Based".to_string()), TestType::PaperBased);
        assert_eq!(
            serde_json::to_string(&TestType::PaperBased).unwrap(),
            r#""Paper-Based""#
        );
    }

    #[test]
    fn valid_form_passes() {
        assert_eq!(form().validate(d("2025-06-10")), Ok(()));
    }

    #[test]
    fn rejects_missing_fields() {
        let mut f = form();
        f.course_name = " ".into();
        assert_eq!(f.validate(d("2025-06-01")), Err(ScheduleValidationError::MissingCourse));

        let mut f = form();
        f.start_date = "10/06/2025".into();
        assert!(matches!(f.validate(d("2025-06-01")), Err(ScheduleValidationError::InvalidDate(_))));

        let mut f = form();
        f.time_slots.clear();
        assert_eq!(f.validate(d("2025-06-01")), Err(ScheduleValidationError::NoSlots));
    }

    #[test]
    fn rejects_past_dates() {
        assert_eq!(form().validate(d("2025-06-11")), Err(ScheduleValidationError::DateInPast));
    }

    #[test]
    fn rejects_bad_slots() {
        let mut f = form();
        f.time_slots[1] = slot("13:00", "13:00", 5);
        assert_eq!(f.validate(d("2025-06-01")), Err(ScheduleValidationError::EmptySlot { index: 2 }));

        let mut f = form();
        f.time_slots[0].total_slot = 0;
        assert_eq!(f.validate(d("2025-06-01")), Err(ScheduleValidationError::ZeroCapacity { index: 1 }));

        let mut f = form();
        f.time_slots[0].start_time = "9am".into();
        assert!(matches!(
            f.validate(d("2025-06-01")),
            Err(ScheduleValidationError::InvalidTime { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_overlapping_slots_but_allows_touching() {
        let mut f = form();
        f.time_slots.push(slot("11:30", "12:30", 5));
        assert_eq!(
            f.validate(d("2025-06-01")),
            Err(ScheduleValidationError::Overlap { first: 1, second: 3 })
        );

        let mut f = form();
        f.time_slots[1] = slot("12:00", "15:00", 5);
        assert_eq!(f.validate(d("2025-06-01")), Ok(()));
    }
}
