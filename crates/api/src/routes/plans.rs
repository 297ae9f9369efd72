//! Route definitions for the `/plans` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::plans;
use crate::state::AppState;

/// Routes mounted at `/plans`. All require authentication.
///
/// ```text
/// GET   /                 -> list plans for a date
/// POST  /                 -> create plan
/// PATCH /                 -> partial update (plan id in body)
/// GET   /counts           -> counts for two dates (today/tomorrow buckets)
/// GET   /history          -> completed plans, newest first
/// POST  /rollover         -> move overdue PLANNED plans to today
/// POST  /{id}/complete    -> mark DONE
/// POST  /{id}/skip        -> mark SKIPPED, defer to tomorrow
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(plans::list_plans)
                .post(plans::create_plan)
                .patch(plans::update_plan),
        )
        .route("/counts", get(plans::plan_counts))
        .route("/history", get(plans::plan_history))
        .route("/rollover", post(plans::rollover_plans))
        .route("/{id}/complete", post(plans::complete_plan))
        .route("/{id}/skip", post(plans::skip_plan))
}
