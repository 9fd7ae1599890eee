//! Cash memo: the payment receipt issued when a candidate buys mock tests.

pub mod aggregate;

pub use aggregate::{
    amount_in_words, CashMemo, CashMemoDraft, CashMemoError, CreateCashMemoDto, DraftStep,
    NextMemoNumber, PaymentMode,
};
