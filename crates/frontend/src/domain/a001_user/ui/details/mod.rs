//! Candidate details tab
//!
//! - view_model.rs: loads the candidate and their bookings
//! - view.rs: profile card and bookings table

mod view;
mod view_model;

pub use view::CandidateDetails;
pub use view_model::CandidateDetailsViewModel;
