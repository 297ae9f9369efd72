//! Admin authorization extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use grindlog_core::error::CoreError;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Wrapper extractor that requires the authenticated user to be an admin.
///
/// Admin status is determined by membership in the configured email allowlist
/// (`ADMIN_EMAILS`). Non-admin users receive a 403.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if !state.config.admin_emails.contains(&user.email) {
            return Err(CoreError::Forbidden("Admin access required".to_string()).into());
        }

        Ok(RequireAdmin(user))
    }
}
