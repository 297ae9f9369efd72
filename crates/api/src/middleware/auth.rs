//! Bearer-token authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use grindlog_core::error::CoreError;
use grindlog_core::types::DbId;

use crate::auth::jwt;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a `Authorization: Bearer <token>` header.
///
/// Handlers that take an `AuthUser` parameter reject unauthenticated requests
/// with a 401 before the handler body runs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The authenticated user's database id (JWT `sub` claim).
    pub user_id: DbId,
    /// The authenticated user's normalized email (JWT `email` claim).
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                CoreError::Unauthorized("Missing Authorization header".to_string())
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            CoreError::Unauthorized("Authorization header must use the Bearer scheme".to_string())
        })?;

        let claims = jwt::validate_token(token, &state.config.jwt)
            .map_err(|_| CoreError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}
