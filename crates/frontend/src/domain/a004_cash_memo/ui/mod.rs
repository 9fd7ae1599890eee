pub mod form;
pub mod lookup;
