//! Domain logic for the grindlog practice tracker.
//!
//! Pure, I/O-free building blocks shared by the `db` and `api` crates:
//! the error taxonomy, the daily-plan state machine and its date bucketing,
//! field validation for signup input, and the admin email allowlist.

pub mod admin;
pub mod approval;
pub mod error;
pub mod plan;
pub mod types;
pub mod validation;
