//! Domain-level error taxonomy.
//!
//! Every fallible domain operation reports one of these variants; the api
//! crate maps them onto HTTP statuses. `NotFound` deliberately carries only
//! an entity name -- missing rows and rows owned by a different user produce
//! the same error so callers cannot probe for other users' records.

use thiserror::Error;

/// Domain error shared across crates.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required field is missing or malformed. Maps to 400.
    #[error("{message}")]
    Validation {
        /// Name of the offending request field.
        field: &'static str,
        message: String,
    },

    /// Missing or invalid credentials. Maps to 401.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed (approval gate, admin gate). Maps to 403.
    #[error("{0}")]
    Forbidden(String),

    /// The resource does not exist or belongs to another user. Maps to 404.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// The request conflicts with existing state. Maps to 409.
    #[error("{0}")]
    Conflict(String),

    /// Too many login attempts within the rate-limit window. Maps to 429.
    #[error("Too many login attempts. Please try again in {retry_after_mins} minutes.")]
    RateLimited { retry_after_mins: i64 },

    /// An unexpected internal failure. Maps to a sanitized 500.
    #[error("{0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a validation error on a named field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CoreError::Validation {
            field,
            message: message.into(),
        }
    }
}
