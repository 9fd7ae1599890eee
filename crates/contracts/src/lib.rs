//! Wire types and client-side rules shared by the portal frontend.
//!
//! Everything here is plain Rust with no browser dependencies, so list
//! reduction, date bucketing, token decoding and form validation are tested
//! natively.

pub mod domain;
pub mod shared;
pub mod system;
