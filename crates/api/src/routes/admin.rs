//! Route definitions for the `/admin` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::approvals;
use crate::state::AppState;

/// Routes mounted at `/admin`. All require an allowlisted admin email.
///
/// ```text
/// GET  /approvals               -> pending signups, oldest first
/// POST /approvals/{id}/approve  -> approve signup
/// POST /approvals/{id}/reject   -> reject signup
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/approvals", get(approvals::list_pending))
        .route("/approvals/{id}/approve", post(approvals::approve))
        .route("/approvals/{id}/reject", post(approvals::reject))
}
