//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod approval_repo;
pub mod login_attempt_repo;
pub mod plan_repo;
pub mod session_repo;
pub mod user_repo;

pub use approval_repo::ApprovalRepo;
pub use login_attempt_repo::LoginAttemptRepo;
pub use plan_repo::PlanRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
