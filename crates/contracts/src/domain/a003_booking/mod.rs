pub mod aggregate;

pub use aggregate::{
    Attendance, Booking, BookingLocation, BookingStatus, Ref, ScheduleSummary, UserSummary,
};
