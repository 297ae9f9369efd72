//! Daily-plan handlers: create, list, counts, history, update, complete,
//! skip, and batch rollover.
//!
//! Every operation is scoped to the authenticated user. A plan id that
//! belongs to someone else is indistinguishable from a missing one: both
//! come back as a 404.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use grindlog_core::error::CoreError;
use grindlog_core::plan::{
    can_transition, is_valid_status, next_day, parse_date, reference_today, STATUS_DONE,
    STATUS_SKIPPED,
};
use grindlog_core::types::{DbId, Timestamp};
use grindlog_db::models::plan::{CreateDailyPlan, DailyPlan, UpdateDailyPlan};
use grindlog_db::repositories::PlanRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    pub problem_title: String,
    pub topic: String,
    pub platform: String,
    pub difficulty: String,
    /// `YYYY-MM-DD`; defaults to today in the reference timezone.
    pub planned_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    /// `YYYY-MM-DD`; defaults to today in the reference timezone.
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlanRequest {
    pub id: DbId,
    pub status: Option<String>,
    pub planned_date: Option<String>,
    pub completed_at: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
pub struct CountsQuery {
    /// `YYYY-MM-DD`; defaults to today in the reference timezone.
    pub today: Option<String>,
    /// `YYYY-MM-DD`; defaults to the day after `today`.
    pub tomorrow: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RolloverRequest {
    /// `YYYY-MM-DD`; defaults to today in the reference timezone.
    pub today: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CountsResponse {
    pub today: i64,
    pub tomorrow: i64,
}

#[derive(Debug, Serialize)]
pub struct RolloverResponse {
    pub rolled_over: u64,
}

/// `POST /api/v1/plans`
pub async fn create_plan(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreatePlanRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<DailyPlan>>)> {
    let problem_title = required_field("problem_title", &payload.problem_title)?;
    let topic = required_field("topic", &payload.topic)?;
    let platform = required_field("platform", &payload.platform)?;
    let difficulty = required_field("difficulty", &payload.difficulty)?;

    let planned_date = match &payload.planned_date {
        Some(raw) => parse_date("planned_date", raw)?,
        None => reference_today(),
    };

    let input = CreateDailyPlan {
        user_id: user.user_id,
        problem_title,
        topic,
        platform,
        difficulty,
        planned_date,
    };
    let plan = PlanRepo::create(&state.pool, &input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: plan })))
}

/// `GET /api/v1/plans?date=YYYY-MM-DD`
pub async fn list_plans(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<DataResponse<Vec<DailyPlan>>>> {
    let date = match &query.date {
        Some(raw) => parse_date("date", raw)?,
        None => reference_today(),
    };

    let plans = PlanRepo::list_for_date(&state.pool, user.user_id, date).await?;
    Ok(Json(DataResponse { data: plans }))
}

/// `GET /api/v1/plans/counts?today=YYYY-MM-DD&tomorrow=YYYY-MM-DD`
///
/// Returns the plan counts for the two requested dates, used by clients to
/// show today/tomorrow workload at a glance. The two counts are independent
/// queries; an empty day counts as zero, never as an error.
pub async fn plan_counts(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<CountsQuery>,
) -> AppResult<Json<DataResponse<CountsResponse>>> {
    let today_date = match &query.today {
        Some(raw) => parse_date("today", raw)?,
        None => reference_today(),
    };
    let tomorrow_date = match &query.tomorrow {
        Some(raw) => parse_date("tomorrow", raw)?,
        None => next_day(today_date),
    };

    let today = PlanRepo::count_for_date(&state.pool, user.user_id, today_date).await?;
    let tomorrow = PlanRepo::count_for_date(&state.pool, user.user_id, tomorrow_date).await?;

    Ok(Json(DataResponse {
        data: CountsResponse { today, tomorrow },
    }))
}

/// `GET /api/v1/plans/history`
pub async fn plan_history(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<DailyPlan>>>> {
    let plans = PlanRepo::list_history(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: plans }))
}

/// `PATCH /api/v1/plans`
///
/// Generic partial update; the target plan id travels in the body. Status
/// changes are checked against the state machine; moving to `DONE` stamps
/// `completed_at` server-side unless the body supplies one. A `completed_at`
/// is only accepted when the plan ends up `DONE`, so never-completed plans
/// keep a null completion time.
pub async fn update_plan(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdatePlanRequest>,
) -> AppResult<Json<DataResponse<DailyPlan>>> {
    let plan = PlanRepo::find_for_user(&state.pool, payload.id, user.user_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Plan" })?;

    let mut update = UpdateDailyPlan::default();

    if let Some(status) = &payload.status {
        if !is_valid_status(status) {
            return Err(CoreError::validation("status", format!("Invalid status: {status}")).into());
        }
        if !can_transition(&plan.status, status) {
            return Err(CoreError::validation(
                "status",
                format!("Cannot change status from {} to {status}", plan.status),
            )
            .into());
        }
        update.status = Some(status.clone());
    }

    let final_status = payload.status.as_deref().unwrap_or(&plan.status);
    if payload.completed_at.is_some() && final_status != STATUS_DONE {
        return Err(CoreError::validation(
            "completed_at",
            format!("Cannot set completed_at on a {final_status} plan"),
        )
        .into());
    }
    if final_status == STATUS_DONE && update.status.is_some() {
        update.completed_at = Some(payload.completed_at.unwrap_or_else(Utc::now));
    } else {
        update.completed_at = payload.completed_at;
    }

    if let Some(raw) = &payload.planned_date {
        update.planned_date = Some(parse_date("planned_date", raw)?);
    }

    let updated = PlanRepo::update(&state.pool, payload.id, user.user_id, &update)
        .await?
        .ok_or(CoreError::NotFound { entity: "Plan" })?;

    Ok(Json(DataResponse { data: updated }))
}

/// `POST /api/v1/plans/{id}/complete`
///
/// Any live plan can be completed (`PLANNED`, `SKIPPED`, or already `DONE`);
/// repeating the call simply re-stamps `completed_at`.
pub async fn complete_plan(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DailyPlan>>> {
    let plan = PlanRepo::complete(&state.pool, id, user.user_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Plan" })?;

    Ok(Json(DataResponse { data: plan }))
}

/// `POST /api/v1/plans/{id}/skip`
///
/// Marks the plan `SKIPPED` and defers it to tomorrow in the reference
/// timezone. Completed plans cannot be skipped.
pub async fn skip_plan(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DailyPlan>>> {
    let plan = PlanRepo::find_for_user(&state.pool, id, user.user_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Plan" })?;

    if !can_transition(&plan.status, STATUS_SKIPPED) {
        return Err(CoreError::validation(
            "status",
            format!("Cannot skip a plan with status {}", plan.status),
        )
        .into());
    }

    let new_date = next_day(reference_today());
    let skipped = PlanRepo::skip(&state.pool, id, user.user_id, new_date)
        .await?
        .ok_or(CoreError::NotFound { entity: "Plan" })?;

    Ok(Json(DataResponse { data: skipped }))
}

/// `POST /api/v1/plans/rollover`
///
/// Moves every still-`PLANNED` plan dated before today to today, in one
/// atomic update. Returns how many plans moved; zero is a normal outcome.
pub async fn rollover_plans(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Option<Json<RolloverRequest>>,
) -> AppResult<Json<DataResponse<RolloverResponse>>> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let today = match &request.today {
        Some(raw) => parse_date("today", raw)?,
        None => reference_today(),
    };

    let rolled_over = PlanRepo::roll_over(&state.pool, user.user_id, today).await?;
    if rolled_over > 0 {
        tracing::info!(user_id = user.user_id, rolled_over, "Rolled over overdue plans");
    }

    Ok(Json(DataResponse {
        data: RolloverResponse { rolled_over },
    }))
}

/// Trim a required text field, rejecting empty values.
fn required_field(field: &'static str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(field, format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}
