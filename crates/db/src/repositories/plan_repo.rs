//! Repository for the `daily_plans` table.
//!
//! Every query here is scoped by `user_id`: a plan id belonging to another
//! user behaves exactly like a missing row, so ownership violations surface
//! as `None` / zero rows and never leak existence.

use chrono::NaiveDate;
use grindlog_core::types::DbId;
use sqlx::PgPool;

use crate::models::plan::{CreateDailyPlan, DailyPlan, UpdateDailyPlan};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, problem_title, topic, platform, difficulty, \
    planned_date, status, completed_at, created_at, updated_at";

/// Provides CRUD and lifecycle operations for daily plans.
pub struct PlanRepo;

impl PlanRepo {
    /// Insert a new plan with `status = PLANNED` and no completion stamp.
    ///
    /// Duplicates are permitted: logging the same title twice on one date
    /// is a feature, not a conflict.
    pub async fn create(pool: &PgPool, input: &CreateDailyPlan) -> Result<DailyPlan, sqlx::Error> {
        let query = format!(
            "INSERT INTO daily_plans
                (user_id, problem_title, topic, platform, difficulty, planned_date, status)
             VALUES ($1, $2, $3, $4, $5, $6, 'PLANNED')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DailyPlan>(&query)
            .bind(input.user_id)
            .bind(&input.problem_title)
            .bind(&input.topic)
            .bind(&input.platform)
            .bind(&input.difficulty)
            .bind(input.planned_date)
            .fetch_one(pool)
            .await
    }

    /// Find a plan by id, scoped to its owner.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<DailyPlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM daily_plans WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, DailyPlan>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's plans for one date, most recently added first.
    pub async fn list_for_date(
        pool: &PgPool,
        user_id: DbId,
        date: NaiveDate,
    ) -> Result<Vec<DailyPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_plans
             WHERE user_id = $1 AND planned_date = $2
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, DailyPlan>(&query)
            .bind(user_id)
            .bind(date)
            .fetch_all(pool)
            .await
    }

    /// List a user's completed plans, most recently completed first.
    pub async fn list_history(pool: &PgPool, user_id: DbId) -> Result<Vec<DailyPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_plans
             WHERE user_id = $1 AND status = 'DONE'
             ORDER BY completed_at DESC, id DESC"
        );
        sqlx::query_as::<_, DailyPlan>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Count a user's plans on one date. Zero rows is a valid answer.
    pub async fn count_for_date(
        pool: &PgPool,
        user_id: DbId,
        date: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM daily_plans WHERE user_id = $1 AND planned_date = $2",
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Apply a partial update. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the plan does not exist or is owned by someone else.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateDailyPlan,
    ) -> Result<Option<DailyPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE daily_plans SET
                status = COALESCE($3, status),
                planned_date = COALESCE($4, planned_date),
                completed_at = COALESCE($5, completed_at),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DailyPlan>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.status)
            .bind(input.planned_date)
            .bind(input.completed_at)
            .fetch_optional(pool)
            .await
    }

    /// Mark a plan `DONE`, stamping `completed_at = NOW()`.
    ///
    /// Valid from any state the plan can be in (a repeated call re-stamps).
    /// Returns `None` if the plan does not exist or is owned by someone else.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<DailyPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE daily_plans
             SET status = 'DONE', completed_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DailyPlan>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a plan `SKIPPED` and move it to `new_date` in one update, so a
    /// skipped task never remains visible under its original date.
    pub async fn skip(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        new_date: NaiveDate,
    ) -> Result<Option<DailyPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE daily_plans
             SET status = 'SKIPPED', planned_date = $3, updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DailyPlan>(&query)
            .bind(id)
            .bind(user_id)
            .bind(new_date)
            .fetch_optional(pool)
            .await
    }

    /// Move every still-`PLANNED` plan dated before `today` to `today`, in
    /// one atomic update. Returns the number of rows moved.
    ///
    /// `SKIPPED` and `DONE` rows are untouched regardless of their date.
    pub async fn roll_over(
        pool: &PgPool,
        user_id: DbId,
        today: NaiveDate,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE daily_plans
             SET planned_date = $2, updated_at = NOW()
             WHERE user_id = $1 AND status = 'PLANNED' AND planned_date < $2",
        )
        .bind(user_id)
        .bind(today)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
