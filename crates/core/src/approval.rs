//! Account approval workflow states.
//!
//! Every signup creates an approval row in `pending` state; an administrator
//! moves it to `approved` or `rejected`, and only `approved` accounts may log
//! in. Decisions are final -- there is no transition back to `pending`.

/// Approval status: awaiting an administrator decision.
pub const STATUS_PENDING: &str = "pending";

/// Approval status: the account may authenticate.
pub const STATUS_APPROVED: &str = "approved";

/// Approval status: the account is permanently refused.
pub const STATUS_REJECTED: &str = "rejected";

/// Whether an approval status represents a final administrator decision.
pub fn is_decided(status: &str) -> bool {
    status == STATUS_APPROVED || status == STATUS_REJECTED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_not_decided() {
        assert!(!is_decided(STATUS_PENDING));
    }

    #[test]
    fn approved_and_rejected_are_decided() {
        assert!(is_decided(STATUS_APPROVED));
        assert!(is_decided(STATUS_REJECTED));
    }
}
