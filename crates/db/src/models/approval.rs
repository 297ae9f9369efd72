//! Account approval model.

use grindlog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_approvals` table.
///
/// One row per signed-up email; `status` is one of the
/// [`grindlog_core::approval`] constants.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserApproval {
    pub id: DbId,
    pub user_id: DbId,
    pub email: String,
    pub status: String,
    /// Set when an administrator approves or rejects; null while pending.
    pub decided_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
