//! Well-known permission ids.
//!
//! These must match the ids stored in `member_permissions`.

/// Administer trainees: preferences, assignments, generations and mentors.
pub const PERMISSION_TRAINEE_ADMIN: i32 = 14;

/// Member status id of a trainee.
pub const MEMBER_STATUS_TRAINEE: i16 = 1;

/// Returns `true` if `granted` contains at least one of `required`.
pub fn has_any_permission(granted: &[i32], required: &[i32]) -> bool {
    required.iter().any(|p| granted.contains(p))
}
