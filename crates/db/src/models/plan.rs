//! Daily plan entity model and DTOs.

use chrono::NaiveDate;
use grindlog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `daily_plans` table: one practice problem scheduled for
/// one calendar date, owned by one user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyPlan {
    pub id: DbId,
    pub user_id: DbId,
    pub problem_title: String,
    pub topic: String,
    pub platform: String,
    pub difficulty: String,
    /// The date (no time component) the task is scheduled for. Moved
    /// forward by skip and rollover, never by anything else.
    pub planned_date: NaiveDate,
    pub status: String,
    /// Set exactly when `status` is `DONE`.
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new daily plan. Status is always `PLANNED` at birth.
#[derive(Debug, Clone)]
pub struct CreateDailyPlan {
    pub user_id: DbId,
    pub problem_title: String,
    pub topic: String,
    pub platform: String,
    pub difficulty: String,
    pub planned_date: NaiveDate,
}

/// DTO for the generic patch operation. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDailyPlan {
    pub status: Option<String>,
    pub planned_date: Option<NaiveDate>,
    pub completed_at: Option<Timestamp>,
}
