//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) where patches are supported

pub mod approval;
pub mod login_attempt;
pub mod plan;
pub mod session;
pub mod user;
