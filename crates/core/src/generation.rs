//! Generation (trainee cohort) rules.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Validate an election window: the start must not lie after the end.
pub fn validate_election_window(start: Timestamp, end: Timestamp) -> Result<(), CoreError> {
    if start > end {
        return Err(CoreError::Validation(
            "The election start date must be before the election end date".to_string(),
        ));
    }
    Ok(())
}

/// Returns `true` while `now` lies inside the (inclusive) election window.
///
/// A generation without a configured window is never open.
pub fn is_election_open(
    start: Option<Timestamp>,
    end: Option<Timestamp>,
    now: Timestamp,
) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => start <= now && now <= end,
        _ => false,
    }
}
