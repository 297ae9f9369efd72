//! Admin approval handlers.

use axum::extract::{Path, State};
use axum::Json;
use grindlog_core::approval::{STATUS_APPROVED, STATUS_REJECTED};
use grindlog_core::error::CoreError;
use grindlog_core::types::DbId;
use grindlog_db::models::approval::UserApproval;
use grindlog_db::repositories::{ApprovalRepo, UserRepo};

use crate::error::AppResult;
use crate::middleware::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// `GET /api/v1/admin/approvals`
///
/// Lists signups still awaiting a decision, oldest first.
pub async fn list_pending(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserApproval>>>> {
    let approvals = ApprovalRepo::list_pending(&state.pool).await?;
    Ok(Json(DataResponse { data: approvals }))
}

/// `POST /api/v1/admin/approvals/{id}/approve`
pub async fn approve(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserApproval>>> {
    let approval = decide(&state, id, STATUS_APPROVED).await?;
    tracing::info!(
        approval_id = approval.id,
        decided_by = admin.email,
        "Account approved"
    );

    // Best-effort notification; failure is logged, not surfaced.
    if let Some(mailer) = state.mailer.clone() {
        if let Some(user) = UserRepo::find_by_id(&state.pool, approval.user_id).await? {
            tokio::spawn(async move {
                if let Err(e) = mailer.send_account_approved(&user.email, &user.username).await {
                    tracing::warn!(error = %e, "Failed to send approval email");
                }
            });
        }
    }

    Ok(Json(DataResponse { data: approval }))
}

/// `POST /api/v1/admin/approvals/{id}/reject`
pub async fn reject(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserApproval>>> {
    let approval = decide(&state, id, STATUS_REJECTED).await?;
    tracing::info!(
        approval_id = approval.id,
        decided_by = admin.email,
        "Account rejected"
    );
    Ok(Json(DataResponse { data: approval }))
}

/// Apply a decision to a still-pending approval.
///
/// Distinguishes a missing row (404) from one that was already decided (409).
async fn decide(
    state: &AppState,
    id: DbId,
    status: &str,
) -> Result<UserApproval, crate::error::AppError> {
    match ApprovalRepo::decide(&state.pool, id, status).await? {
        Some(approval) => Ok(approval),
        None => match ApprovalRepo::find_by_id(&state.pool, id).await? {
            Some(_) => Err(CoreError::Conflict(
                "This approval has already been decided".to_string(),
            )
            .into()),
            None => Err(CoreError::NotFound { entity: "Approval" }.into()),
        },
    }
}
