//! Daily-plan state machine and reference-timezone date bucketing.
//!
//! A plan moves `PLANNED -> DONE`, `PLANNED -> SKIPPED`, or `SKIPPED -> DONE`.
//! Nothing leaves `DONE`, and nothing re-enters `PLANNED`; the rollover batch
//! operation only moves the `planned_date` of still-`PLANNED` rows, never the
//! status. Repeating a transition in place (e.g. completing an already-done
//! plan) is permitted and idempotent.
//!
//! "Today" and "tomorrow" are defined in a single fixed display timezone
//! (IST, UTC+05:30) regardless of server locale, because the product shows
//! all users the same day boundary.

use chrono::{Duration, FixedOffset, NaiveDate, Utc};

use crate::error::CoreError;

/// Plan status: scheduled, not yet acted on.
pub const STATUS_PLANNED: &str = "PLANNED";

/// Plan status: completed; `completed_at` is always set.
pub const STATUS_DONE: &str = "DONE";

/// Plan status: deferred to the next day.
pub const STATUS_SKIPPED: &str = "SKIPPED";

/// Offset of the reference timezone (IST) from UTC, in seconds.
const REFERENCE_TZ_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Whether `status` is one of the three recognised plan states.
pub fn is_valid_status(status: &str) -> bool {
    matches!(status, STATUS_PLANNED | STATUS_DONE | STATUS_SKIPPED)
}

/// Whether the state machine permits moving a plan from `from` to `to`.
///
/// Staying in the same state is always allowed (a repeated Complete
/// re-stamps `completed_at`; a repeated Skip re-defers).
pub fn can_transition(from: &str, to: &str) -> bool {
    if from == to {
        return is_valid_status(from);
    }
    matches!(
        (from, to),
        (STATUS_PLANNED, STATUS_DONE)
            | (STATUS_PLANNED, STATUS_SKIPPED)
            | (STATUS_SKIPPED, STATUS_DONE)
    )
}

/// The fixed reference timezone used for all day-boundary computations.
pub fn reference_offset() -> FixedOffset {
    FixedOffset::east_opt(REFERENCE_TZ_OFFSET_SECS).expect("IST offset is in range")
}

/// Today's calendar date in the reference timezone.
pub fn reference_today() -> NaiveDate {
    Utc::now().with_timezone(&reference_offset()).date_naive()
}

/// The calendar day after `date`.
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date + Duration::days(1)
}

/// Parse a `YYYY-MM-DD` date string, reporting a validation error against
/// the given request field on failure.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CoreError::validation(field, format!("{field} must be a YYYY-MM-DD date")))
}
