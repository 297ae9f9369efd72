//! Login attempt audit model.

use grindlog_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `login_attempts` table. Every login attempt is recorded,
/// successful or not; the failure rows back the rate limiter.
#[derive(Debug, Clone, FromRow)]
pub struct LoginAttempt {
    pub id: DbId,
    pub email: String,
    pub success: bool,
    pub error_message: Option<String>,
    pub ip_address: Option<String>,
    pub attempted_at: Timestamp,
}

/// DTO for recording a login attempt.
#[derive(Debug, Clone)]
pub struct CreateLoginAttempt {
    pub email: String,
    pub success: bool,
    pub error_message: Option<String>,
    pub ip_address: Option<String>,
}
