//! Response bodies of the membership database API.

use chrono::{DateTime, NaiveDate, Utc};
use mdb_core::assignment::{AxisState, PreferenceRecord};
use mdb_core::types::DbId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub id: DbId,
    pub description: String,
    pub election_start: Option<DateTime<Utc>>,
    pub election_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub election_open: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalProject {
    pub id: DbId,
    pub generation_id: DbId,
    pub project_name: String,
    pub abbreviation: String,
    pub kickoff: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    pub member_id: DbId,
    pub firstname: String,
    pub lastname: String,
}

impl Mentor {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DbId,
    pub name: String,
    pub short_name: String,
}

/// One trainee row: ranked choices, assigned values and their display names.
///
/// A `*_choice` field without a rank is the assigned value of the axis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TraineeChoice {
    pub member_id: DbId,
    pub firstname: String,
    pub lastname: String,

    pub mentor_choice: Option<DbId>,
    pub mentor_choice_name: Option<String>,
    pub mentor_choice1: Option<DbId>,
    pub mentor_choice1_name: Option<String>,
    pub mentor_choice2: Option<DbId>,
    pub mentor_choice2_name: Option<String>,
    pub mentor_choice3: Option<DbId>,
    pub mentor_choice3_name: Option<String>,

    pub department_choice: Option<DbId>,
    pub department_choice_short_name: Option<String>,
    pub department_choice1: Option<DbId>,
    pub department_choice1_short_name: Option<String>,
    pub department_choice2: Option<DbId>,
    pub department_choice2_short_name: Option<String>,
    pub department_choice3: Option<DbId>,
    pub department_choice3_short_name: Option<String>,

    pub internal_project_choice: Option<DbId>,
    pub internal_project_choice_short_name: Option<String>,
    pub internal_project_choice1: Option<DbId>,
    pub internal_project_choice1_short_name: Option<String>,
    pub internal_project_choice1_motivation: Option<String>,
    pub internal_project_choice2: Option<DbId>,
    pub internal_project_choice2_short_name: Option<String>,
    pub internal_project_choice2_motivation: Option<String>,
    pub internal_project_choice3: Option<DbId>,
    pub internal_project_choice3_short_name: Option<String>,
    pub internal_project_choice3_motivation: Option<String>,
}

impl TraineeChoice {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }

    /// Project the row onto the three axis states.
    pub fn preference_record(&self) -> PreferenceRecord {
        PreferenceRecord {
            trainee_id: self.member_id,
            department: AxisState::new(
                self.department_choice1,
                self.department_choice2,
                self.department_choice3,
                self.department_choice,
            ),
            mentor: AxisState::new(
                self.mentor_choice1,
                self.mentor_choice2,
                self.mentor_choice3,
                self.mentor_choice,
            ),
            internal_project: AxisState::new(
                self.internal_project_choice1,
                self.internal_project_choice2,
                self.internal_project_choice3,
                self.internal_project_choice,
            ),
        }
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub member_id: DbId,
    pub permissions: Vec<i32>,
}
