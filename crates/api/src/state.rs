use std::sync::Arc;

use crate::config::ServerConfig;
use crate::mailer::Mailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// All service handles are constructed at startup and passed in explicitly;
/// there is no process-wide client state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: grindlog_db::DbPool,
    /// Server configuration (JWT secrets, admin allowlist, CORS).
    pub config: Arc<ServerConfig>,
    /// Outbound mailer; `None` when SMTP is not configured, in which case
    /// notification emails are silently skipped.
    pub mailer: Option<Arc<Mailer>>,
}
