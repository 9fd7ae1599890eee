pub mod api;
pub mod business_time;
pub mod date_bucket;
pub mod list_view;
