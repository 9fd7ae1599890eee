pub mod api_utils;
pub mod cancel;
pub mod components;
pub mod date_utils;
pub mod icons;
pub mod list_state;
pub mod list_utils;
pub mod notify;
pub mod page_frame;
pub mod page_standard;
