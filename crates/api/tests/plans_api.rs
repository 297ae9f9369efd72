//! HTTP-level integration tests for the daily-plan lifecycle: create, list,
//! counts, history, update, complete, skip, and batch rollover.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, patch_json_auth, post_auth, post_json_auth};
use grindlog_api::auth::jwt::generate_access_token;
use grindlog_core::approval::STATUS_APPROVED;
use grindlog_db::models::user::{CreateUser, User};
use grindlog_db::repositories::UserRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create an approved user directly in the database and mint a valid access
/// token for it using the test JWT config.
async fn seed_user(pool: &PgPool, username: &str) -> (User, String) {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$placeholder$placeholder".to_string(),
    };
    let (user, _approval) = UserRepo::create_with_approval(pool, &input, STATUS_APPROVED)
        .await
        .expect("user creation should succeed");

    let token = generate_access_token(user.id, &user.email, &common::test_config().jwt)
        .expect("token generation should succeed");
    (user, token)
}

/// Create a plan via the API for the given date and return its JSON.
async fn create_plan(pool: &PgPool, token: &str, title: &str, date: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "problem_title": title,
        "topic": "graphs",
        "platform": "leetcode",
        "difficulty": "medium",
        "planned_date": date,
    });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/plans",
        token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Create and list
// ---------------------------------------------------------------------------

/// A created plan starts PLANNED with no completion stamp.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_plan(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "creator").await;

    let json = create_plan(&pool, &token, "Two Sum", "2026-03-01").await;
    assert_eq!(json["data"]["status"], "PLANNED");
    assert_eq!(json["data"]["problem_title"], "Two Sum");
    assert_eq!(json["data"]["planned_date"], "2026-03-01");
    assert!(json["data"]["completed_at"].is_null());
}

/// Required text fields reject empty or whitespace-only values.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_plan_rejects_blank_title(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "blanktitle").await;

    let body = serde_json::json!({
        "problem_title": "   ",
        "topic": "graphs",
        "platform": "leetcode",
        "difficulty": "medium",
        "planned_date": "2026-03-01",
    });
    let response =
        post_json_auth(common::build_test_app(pool), "/api/v1/plans", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["field"], "problem_title");
}

/// A malformed date in the query string is a validation error, not a 500.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_plans_bad_date(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "baddate").await;

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/plans?date=03-01-2026",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Listing returns only the caller's plans for the requested date.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_plans_scoped_to_user_and_date(pool: PgPool) {
    let (_alice, alice_token) = seed_user(&pool, "alice").await;
    let (_bob, bob_token) = seed_user(&pool, "bob").await;

    create_plan(&pool, &alice_token, "Two Sum", "2026-03-01").await;
    create_plan(&pool, &alice_token, "Course Schedule", "2026-03-02").await;
    create_plan(&pool, &bob_token, "Word Ladder", "2026-03-01").await;

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/plans?date=2026-03-01",
        &alice_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let plans = json["data"].as_array().unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0]["problem_title"], "Two Sum");
}

// ---------------------------------------------------------------------------
// Counts and history
// ---------------------------------------------------------------------------

/// Counts cover the requested date and the day after; empty days are zero.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_plan_counts(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "counter").await;

    create_plan(&pool, &token, "Two Sum", "2026-03-01").await;
    create_plan(&pool, &token, "Three Sum", "2026-03-01").await;
    create_plan(&pool, &token, "Four Sum", "2026-03-02").await;

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/plans/counts?today=2026-03-01&tomorrow=2026-03-02",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["today"], 2);
    assert_eq!(json["data"]["tomorrow"], 1);

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/plans/counts?today=2026-06-15&tomorrow=2026-06-16",
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["today"], 0);
    assert_eq!(json["data"]["tomorrow"], 0);
}

/// History lists only completed plans.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_history_only_done(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "historian").await;

    let done = create_plan(&pool, &token, "Two Sum", "2026-03-01").await;
    create_plan(&pool, &token, "Three Sum", "2026-03-01").await;

    let done_id = done["data"]["id"].as_i64().unwrap();
    let response = post_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/plans/{done_id}/complete"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/plans/history",
        &token,
    )
    .await;
    let json = body_json(response).await;
    let history = json["data"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["problem_title"], "Two Sum");
    assert_eq!(history[0]["status"], "DONE");
}

// ---------------------------------------------------------------------------
// Complete and skip
// ---------------------------------------------------------------------------

/// Completing a plan stamps completed_at; a repeated call is still a 200.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_complete_is_repeatable(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "finisher").await;
    let plan = create_plan(&pool, &token, "Two Sum", "2026-03-01").await;
    let id = plan["data"]["id"].as_i64().unwrap();

    let response = post_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/plans/{id}/complete"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "DONE");
    assert!(json["data"]["completed_at"].is_string());

    let response = post_auth(
        common::build_test_app(pool),
        &format!("/api/v1/plans/{id}/complete"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Skipping marks the plan SKIPPED and moves it off its original date.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_skip_defers_to_tomorrow(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "skipper").await;
    let plan = create_plan(&pool, &token, "Two Sum", "2026-03-01").await;
    let id = plan["data"]["id"].as_i64().unwrap();
    let original_date = plan["data"]["planned_date"].as_str().unwrap().to_string();

    let response = post_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/plans/{id}/skip"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "SKIPPED");
    assert_ne!(json["data"]["planned_date"], original_date);

    // A skipped plan can still be completed afterwards.
    let response = post_auth(
        common::build_test_app(pool),
        &format!("/api/v1/plans/{id}/complete"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "DONE");
}

/// A completed plan cannot be skipped.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_skip_done_plan_rejected(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "regretful").await;
    let plan = create_plan(&pool, &token, "Two Sum", "2026-03-01").await;
    let id = plan["data"]["id"].as_i64().unwrap();

    post_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/plans/{id}/complete"),
        &token,
    )
    .await;

    let response = post_auth(
        common::build_test_app(pool),
        &format!("/api/v1/plans/{id}/skip"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Another user's plan id behaves exactly like a missing one.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_foreign_plan_is_404(pool: PgPool) {
    let (_alice, alice_token) = seed_user(&pool, "alice2").await;
    let (_bob, bob_token) = seed_user(&pool, "bob2").await;

    let plan = create_plan(&pool, &alice_token, "Two Sum", "2026-03-01").await;
    let id = plan["data"]["id"].as_i64().unwrap();

    let response = post_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/plans/{id}/complete"),
        &bob_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = patch_json_auth(
        common::build_test_app(pool),
        "/api/v1/plans",
        &bob_token,
        serde_json::json!({ "id": id, "planned_date": "2026-04-01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Patch
// ---------------------------------------------------------------------------

/// The generic patch enforces the state machine.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_patch_status_transitions(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "patcher").await;
    let plan = create_plan(&pool, &token, "Two Sum", "2026-03-01").await;
    let id = plan["data"]["id"].as_i64().unwrap();

    // PLANNED -> DONE via patch stamps completed_at.
    let response = patch_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/plans",
        &token,
        serde_json::json!({ "id": id, "status": "DONE" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "DONE");
    assert!(json["data"]["completed_at"].is_string());

    // DONE -> PLANNED is not a legal transition.
    let response = patch_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/plans",
        &token,
        serde_json::json!({ "id": id, "status": "PLANNED" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown statuses are rejected outright.
    let response = patch_json_auth(
        common::build_test_app(pool),
        "/api/v1/plans",
        &token,
        serde_json::json!({ "id": id, "status": "ARCHIVED" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A body-supplied completed_at is only accepted when the plan ends up DONE.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_patch_completed_at_requires_done(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "backfiller").await;
    let plan = create_plan(&pool, &token, "Two Sum", "2026-03-01").await;
    let id = plan["data"]["id"].as_i64().unwrap();

    // completed_at alone on a PLANNED plan is rejected, and the plan keeps
    // its null completion stamp.
    let response = patch_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/plans",
        &token,
        serde_json::json!({ "id": id, "completed_at": "2026-03-01T10:00:00Z" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["field"], "completed_at");

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/plans?date=2026-03-01",
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert!(json["data"][0]["completed_at"].is_null());

    // Supplied alongside the DONE transition it is taken verbatim.
    let response = patch_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/plans",
        &token,
        serde_json::json!({
            "id": id,
            "status": "DONE",
            "completed_at": "2026-03-01T10:00:00Z",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["completed_at"], "2026-03-01T10:00:00Z");

    // Once DONE, the stamp can be adjusted on its own.
    let response = patch_json_auth(
        common::build_test_app(pool),
        "/api/v1/plans",
        &token,
        serde_json::json!({ "id": id, "completed_at": "2026-03-01T11:30:00Z" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "DONE");
    assert_eq!(json["data"]["completed_at"], "2026-03-01T11:30:00Z");
}

/// Patching only the date leaves the status untouched.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_patch_date_only(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "rescheduler").await;
    let plan = create_plan(&pool, &token, "Two Sum", "2026-03-01").await;
    let id = plan["data"]["id"].as_i64().unwrap();

    let response = patch_json_auth(
        common::build_test_app(pool),
        "/api/v1/plans",
        &token,
        serde_json::json!({ "id": id, "planned_date": "2026-03-05" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["planned_date"], "2026-03-05");
    assert_eq!(json["data"]["status"], "PLANNED");
}

// ---------------------------------------------------------------------------
// Rollover
// ---------------------------------------------------------------------------

/// Rollover moves overdue PLANNED plans to today and reports the count.
/// SKIPPED and DONE plans stay where they are.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_rollover(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "roller").await;

    let overdue_a = create_plan(&pool, &token, "Two Sum", "2026-03-01").await;
    create_plan(&pool, &token, "Three Sum", "2026-03-02").await;
    let done = create_plan(&pool, &token, "Four Sum", "2026-03-01").await;
    let done_id = done["data"]["id"].as_i64().unwrap();
    post_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/plans/{done_id}/complete"),
        &token,
    )
    .await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/plans/rollover",
        &token,
        serde_json::json!({ "today": "2026-03-10" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["rolled_over"], 2);

    // The moved plan is now listed under the new date, still PLANNED.
    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/plans?date=2026-03-10",
        &token,
    )
    .await;
    let json = body_json(response).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["problem_title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"Two Sum"));
    assert!(titles.contains(&"Three Sum"));
    let overdue_a_id = overdue_a["data"]["id"].as_i64().unwrap();
    for plan in json["data"].as_array().unwrap() {
        if plan["id"].as_i64().unwrap() == overdue_a_id {
            assert_eq!(plan["status"], "PLANNED");
        }
    }

    // Nothing left to roll: a second sweep reports zero.
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/plans/rollover",
        &token,
        serde_json::json!({ "today": "2026-03-10" }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["rolled_over"], 0);
}

/// All plan routes require authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_plans_require_auth(pool: PgPool) {
    let response = common::get(common::build_test_app(pool.clone()), "/api/v1/plans").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = common::post_json(
        common::build_test_app(pool),
        "/api/v1/plans/rollover",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
