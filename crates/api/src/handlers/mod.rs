//! HTTP request handlers, grouped by resource.

pub mod approvals;
pub mod auth;
pub mod plans;
