//! Request extractors for authentication and authorization.

pub mod admin;
pub mod auth;

pub use admin::RequireAdmin;
pub use auth::AuthUser;
