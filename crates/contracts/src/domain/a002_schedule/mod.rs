pub mod aggregate;

pub use aggregate::{
    CreateScheduleDto, NewTimeSlot, Schedule, ScheduleValidationError, TestType, TimeSlot, COURSES,
};
