//! Repository for the `users` table.

use grindlog_core::types::DbId;
use sqlx::PgPool;

use crate::models::approval::UserApproval;
use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";

/// Column list for the approval row returned by the signup transaction.
const APPROVAL_COLUMNS: &str =
    "id, user_id, email, status, decided_at, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user together with its approval row in one transaction.
    ///
    /// Either both rows exist afterwards or neither does; there is no window
    /// where an account exists without an approval record.
    pub async fn create_with_approval(
        pool: &PgPool,
        input: &CreateUser,
        approval_status: &str,
    ) -> Result<(User, UserApproval), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_query = format!(
            "INSERT INTO users (username, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&user_query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(&mut *tx)
            .await?;

        let approval_query = format!(
            "INSERT INTO user_approvals (user_id, email, status, decided_at)
             VALUES ($1, $2, $3, CASE WHEN $3 = 'pending' THEN NULL ELSE NOW() END)
             RETURNING {APPROVAL_COLUMNS}"
        );
        let approval = sqlx::query_as::<_, UserApproval>(&approval_query)
            .bind(user.id)
            .bind(&input.email)
            .bind(approval_status)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((user, approval))
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by normalized email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
