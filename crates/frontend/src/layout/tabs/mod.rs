//! Tab workspace
//!
//! - `page`: TabPage wrapper that keeps a tab mounted while hidden
//! - `registry`: tab key -> page, and tab key -> role section
//! - `tab_labels`: tab titles

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{detail_tab_label, tab_label_for_key};
