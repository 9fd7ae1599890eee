pub mod a001_user;
pub mod a002_schedule;
pub mod a003_booking;
pub mod a004_cash_memo;
pub mod a005_trf;
