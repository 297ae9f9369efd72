pub mod admin;
pub mod auth;
pub mod health;
pub mod plans;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                     signup (public)
/// /auth/login                      login (public)
/// /auth/refresh                    refresh (public)
/// /auth/logout                     logout
///
/// /user/profile                    current user (requires auth)
///
/// /plans                           list, create, partial update (id in body)
/// /plans/counts                    counts for two dates (today/tomorrow)
/// /plans/history                   completed plans, newest first
/// /plans/rollover                  move overdue PLANNED plans to today (POST)
/// /plans/{id}/complete             mark DONE (POST)
/// /plans/{id}/skip                 mark SKIPPED, defer to tomorrow (POST)
///
/// /admin/approvals                 pending signups (admin only)
/// /admin/approvals/{id}/approve    approve signup (POST, admin only)
/// /admin/approvals/{id}/reject     reject signup (POST, admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/plans", plans::router())
        .nest("/admin", admin::router())
        .route("/user/profile", get(handlers::auth::profile))
}
