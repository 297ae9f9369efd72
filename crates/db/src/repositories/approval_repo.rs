//! Repository for the `user_approvals` table.

use grindlog_core::types::DbId;
use sqlx::PgPool;

use crate::models::approval::UserApproval;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, email, status, decided_at, created_at, updated_at";

/// Provides read and decision operations for account approvals.
pub struct ApprovalRepo;

impl ApprovalRepo {
    /// Find an approval by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserApproval>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_approvals WHERE id = $1");
        sqlx::query_as::<_, UserApproval>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the approval row for a normalized email.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<UserApproval>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_approvals WHERE email = $1");
        sqlx::query_as::<_, UserApproval>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all approvals still awaiting a decision, oldest first.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<UserApproval>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_approvals
             WHERE status = 'pending'
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, UserApproval>(&query)
            .fetch_all(pool)
            .await
    }

    /// Record an administrator decision, stamping `decided_at`.
    ///
    /// Only still-pending rows are updated; returns `None` if the row does
    /// not exist or was already decided.
    pub async fn decide(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<UserApproval>, sqlx::Error> {
        let query = format!(
            "UPDATE user_approvals
             SET status = $2, decided_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserApproval>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
