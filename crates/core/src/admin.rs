//! Administrator email allowlist.
//!
//! There is no roles table: an account is an administrator when its email
//! appears in the comma-separated `ADMIN_EMAILS` environment variable. Admin
//! signups are auto-approved and admin accounts may decide pending approvals.

use crate::validation::normalize_email;

/// Parsed administrator email allowlist. Stored in server configuration and
/// passed explicitly to whoever needs it; never read from ambient state.
#[derive(Debug, Clone, Default)]
pub struct AdminEmails(Vec<String>);

impl AdminEmails {
    /// Parse a comma-separated list of emails, normalizing each entry.
    /// Empty entries are ignored.
    pub fn from_list(list: &str) -> Self {
        let emails = list
            .split(',')
            .map(normalize_email)
            .filter(|e| !e.is_empty())
            .collect();
        Self(emails)
    }

    /// Load the allowlist from the `ADMIN_EMAILS` environment variable.
    /// An unset variable yields an empty allowlist (no administrators).
    pub fn from_env() -> Self {
        Self::from_list(&std::env::var("ADMIN_EMAILS").unwrap_or_default())
    }

    /// Whether the given email (in any casing) is an administrator.
    pub fn contains(&self, email: &str) -> bool {
        let normalized = normalize_email(email);
        self.0.iter().any(|e| *e == normalized)
    }

    /// Whether the allowlist is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
