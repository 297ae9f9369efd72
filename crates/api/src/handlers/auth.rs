//! Account handlers: signup, login, token refresh, logout, and profile.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{Duration, Utc};
use grindlog_core::approval::{STATUS_APPROVED, STATUS_PENDING, STATUS_REJECTED};
use grindlog_core::error::CoreError;
use grindlog_core::validation::{normalize_email, normalize_username, validate_signup};
use grindlog_db::models::login_attempt::CreateLoginAttempt;
use grindlog_db::models::session::CreateSession;
use grindlog_db::models::user::{CreateUser, User, UserResponse};
use grindlog_db::repositories::{ApprovalRepo, LoginAttemptRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::{jwt, password};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum failed logins per email inside the rate-limit window.
const LOGIN_RATE_LIMIT: i64 = 5;

/// Rate-limit window in minutes.
const LOGIN_WINDOW_MINS: i64 = 15;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user: UserResponse,
    pub approval_status: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `POST /api/v1/auth/signup`
///
/// Creates the user and its approval row in one transaction. Accounts whose
/// email is on the admin allowlist are approved immediately; everyone else
/// starts `pending` and cannot log in until an admin approves them.
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SignupResponse>>)> {
    validate_signup(&payload.email, &payload.username, &payload.password)?;

    let email = normalize_email(&payload.email);
    let username = normalize_username(&payload.username);

    if let Some(existing) = ApprovalRepo::find_by_email(&state.pool, &email).await? {
        let message = match existing.status.as_str() {
            STATUS_PENDING => "An account with this email is already pending approval",
            STATUS_REJECTED => "An account with this email has been rejected",
            _ => "An account with this email already exists",
        };
        return Err(CoreError::Conflict(message.to_string()).into());
    }

    let password_hash = password::hash_password(&payload.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let approval_status = if state.config.admin_emails.contains(&email) {
        STATUS_APPROVED
    } else {
        STATUS_PENDING
    };

    let input = CreateUser {
        username,
        email,
        password_hash,
    };
    let (user, approval) =
        UserRepo::create_with_approval(&state.pool, &input, approval_status).await?;

    tracing::info!(
        user_id = user.id,
        status = approval.status,
        "New account created"
    );

    // Email delivery is best-effort; a failed send never fails the signup.
    if let Some(mailer) = state.mailer.clone() {
        let to = user.email.clone();
        let name = user.username.clone();
        let approved = approval.status == STATUS_APPROVED;
        tokio::spawn(async move {
            let result = if approved {
                mailer.send_account_approved(&to, &name).await
            } else {
                mailer.send_signup_received(&to, &name).await
            };
            if let Err(e) = result {
                tracing::warn!(error = %e, "Failed to send signup email");
            }
        });
    }

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SignupResponse {
                user: UserResponse::from(&user),
                approval_status: approval.status,
            },
        }),
    ))
}

/// `POST /api/v1/auth/login`
///
/// Rejected before the password check when the account is missing, pending,
/// or rejected. Every attempt is recorded; more than [`LOGIN_RATE_LIMIT`]
/// failures inside the window yields a 429.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let email = normalize_email(&payload.email);
    let ip_address = client_ip(&headers);

    let window_start = Utc::now() - Duration::minutes(LOGIN_WINDOW_MINS);
    let failures =
        LoginAttemptRepo::count_recent_failures(&state.pool, &email, window_start).await?;
    if failures >= LOGIN_RATE_LIMIT {
        record_failure(&state, &email, "Rate limited", &ip_address).await?;
        return Err(CoreError::RateLimited {
            retry_after_mins: LOGIN_WINDOW_MINS,
        }
        .into());
    }

    let user = match UserRepo::find_by_email(&state.pool, &email).await? {
        Some(user) => user,
        None => {
            record_failure(&state, &email, "No account found with this email", &ip_address)
                .await?;
            return Err(
                CoreError::Unauthorized("No account found with this email".to_string()).into(),
            );
        }
    };

    // The approval gate comes before the password check so a pending user
    // gets an actionable message instead of a credentials error.
    let approval = ApprovalRepo::find_by_email(&state.pool, &email).await?;
    match approval.as_ref().map(|a| a.status.as_str()) {
        Some(STATUS_APPROVED) => {}
        Some(STATUS_PENDING) => {
            record_failure(&state, &email, "Account pending approval", &ip_address).await?;
            return Err(CoreError::Forbidden(
                "Your account is pending admin approval".to_string(),
            )
            .into());
        }
        _ => {
            record_failure(&state, &email, "Account not approved", &ip_address).await?;
            return Err(
                CoreError::Forbidden("Your account has not been approved".to_string()).into(),
            );
        }
    }

    let verified = password::verify_password(&payload.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !verified {
        record_failure(&state, &email, "Invalid password", &ip_address).await?;
        return Err(CoreError::Unauthorized("Invalid email or password".to_string()).into());
    }

    LoginAttemptRepo::record(
        &state.pool,
        &CreateLoginAttempt {
            email: email.clone(),
            success: true,
            error_message: None,
            ip_address,
        },
    )
    .await?;

    let response = create_auth_response(&state, &user).await?;
    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(DataResponse { data: response }))
}

/// `POST /api/v1/auth/refresh`
///
/// Rotates the refresh token: the presented session is revoked and a fresh
/// access/refresh pair is issued.
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let token_hash = jwt::hash_refresh_token(&payload.refresh_token);

    let session = SessionRepo::find_active_by_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Invalid or expired refresh token".to_string()))?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Invalid or expired refresh token".to_string()))?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(DataResponse { data: response }))
}

/// `POST /api/v1/auth/logout`
///
/// Revokes every live session belonging to the caller, so all refresh
/// tokens stop working at once. Repeating the call is a no-op.
pub async fn logout(
    State(state): State<AppState>,
    user: crate::middleware::AuthUser,
) -> AppResult<Json<DataResponse<MessageResponse>>> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, user.user_id).await?;
    tracing::info!(user_id = user.user_id, revoked, "User logged out");

    Ok(Json(DataResponse {
        data: MessageResponse {
            message: "Logged out".to_string(),
        },
    }))
}

/// `GET /api/v1/user/profile`
pub async fn profile(
    State(state): State<AppState>,
    user: crate::middleware::AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "User" })?;

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// Issue an access/refresh pair for `user` and persist the refresh session.
async fn create_auth_response(state: &AppState, user: &User) -> Result<AuthResponse, AppError> {
    let access_token = jwt::generate_access_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    let (refresh_token, refresh_token_hash) = jwt::generate_refresh_token();
    let expires_at = Utc::now() + Duration::days(state.config.jwt.refresh_token_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash,
            expires_at,
        },
    )
    .await?;

    Ok(AuthResponse {
        user: UserResponse::from(user),
        access_token,
        refresh_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
    })
}

/// Record one failed login attempt.
async fn record_failure(
    state: &AppState,
    email: &str,
    reason: &str,
    ip_address: &Option<String>,
) -> Result<(), AppError> {
    LoginAttemptRepo::record(
        &state.pool,
        &CreateLoginAttempt {
            email: email.to_string(),
            success: false,
            error_message: Some(reason.to_string()),
            ip_address: ip_address.clone(),
        },
    )
    .await?;
    Ok(())
}

/// Best-effort client IP from the `x-forwarded-for` header.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
