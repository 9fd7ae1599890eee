pub mod details;
pub mod list;
pub mod my_profile;
pub mod profile_requests;
