//! Trainee preference rows.

use mdb_core::assignment::{AxisState, PreferenceRecord};
use mdb_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// Choices, assigned values and display names of one trainee.
///
/// `*_choice` (without a rank) is the assigned value of the axis.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
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

/// Motivation statements of one trainee for its internal-project choices.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraineeMotivation {
    #[serde(rename = "memberID")]
    pub member_id: DbId,
    pub internal_project1_motivation: Option<String>,
    pub internal_project2_motivation: Option<String>,
    pub internal_project3_motivation: Option<String>,
}
