//! Member model, mentor projection and DTOs.

use mdb_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Public member representation (no credentials).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: DbId,
    pub firstname: String,
    pub lastname: String,
    pub username: Option<String>,
    pub member_status_id: i16,
    pub generation_id: Option<DbId>,
}

/// Login credentials of a member.
///
/// Contains the password hash -- NEVER serialize this to API responses.
#[derive(Debug, Clone, FromRow)]
pub struct MemberCredentials {
    pub id: DbId,
    pub username: String,
    pub password_hash: Option<String>,
}

/// A member registered as mentor of a generation.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    pub member_id: DbId,
    pub firstname: String,
    pub lastname: String,
    pub generation_id: DbId,
}

/// DTO for creating a new member.
///
/// Trainee preference columns are only written here; the assignment
/// columns are written by `TraineeRepo::update_assignment`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMember {
    pub firstname: String,
    pub lastname: String,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    /// Defaults to the trainee status if omitted.
    pub member_status_id: Option<i16>,
    pub generation_id: Option<DbId>,
    pub department_choices: [Option<DbId>; 3],
    pub mentor_choices: [Option<DbId>; 3],
    pub internal_project_choices: [Option<DbId>; 3],
    pub internal_project_motivations: [Option<String>; 3],
}
