//! Repository for the `login_attempts` table.

use grindlog_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::login_attempt::CreateLoginAttempt;

/// Records login attempts and answers rate-limit queries.
pub struct LoginAttemptRepo;

impl LoginAttemptRepo {
    /// Record one login attempt.
    pub async fn record(pool: &PgPool, input: &CreateLoginAttempt) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO login_attempts (email, success, error_message, ip_address)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&input.email)
        .bind(input.success)
        .bind(&input.error_message)
        .bind(&input.ip_address)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Count failed attempts for an email since the given instant.
    pub async fn count_recent_failures(
        pool: &PgPool,
        email: &str,
        since: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM login_attempts
             WHERE email = $1 AND success = false AND attempted_at >= $2",
        )
        .bind(email)
        .bind(since)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
