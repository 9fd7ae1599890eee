//! Cash memo wizard
//!
//! - view_model.rs: draft, step navigation and submission
//! - view.rs: step forms and the success panel

mod view;
mod view_model;

pub use view::CashMemoForm;
pub use view_model::CashMemoFormViewModel;
