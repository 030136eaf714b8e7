//! Trainee preference reconciliation.
//!
//! A trainee ranks up to three choices on each [`Axis`]. An admin then
//! assigns a final value per axis, either one of the ranked choices or any
//! other value from the axis catalog. [`AxisState`] is the immutable value
//! object for one axis; every transition returns a new state.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Axis and choice rank
// ---------------------------------------------------------------------------

/// One of the three independent assignment dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Department,
    Mentor,
    InternalProject,
}

impl Axis {
    /// All axes in display order.
    pub const ALL: [Axis; 3] = [Axis::Department, Axis::Mentor, Axis::InternalProject];

    /// Human-readable name used in log output.
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Department => "department",
            Axis::Mentor => "mentor",
            Axis::InternalProject => "internal_project",
        }
    }
}

/// Position of a ranked choice (1st, 2nd or 3rd preference).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceRank {
    First,
    Second,
    Third,
}

impl ChoiceRank {
    pub const ALL: [ChoiceRank; 3] = [ChoiceRank::First, ChoiceRank::Second, ChoiceRank::Third];

    fn index(self) -> usize {
        match self {
            ChoiceRank::First => 0,
            ChoiceRank::Second => 1,
            ChoiceRank::Third => 2,
        }
    }

    /// 1-based position as shown to the admin.
    pub fn position(self) -> u8 {
        self.index() as u8 + 1
    }
}

// ---------------------------------------------------------------------------
// AxisState
// ---------------------------------------------------------------------------

/// Which option of an axis is effectively selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Nothing assigned.
    Unassigned,
    /// The assigned value equals this ranked choice.
    Choice(ChoiceRank),
    /// The assigned value lies outside the ranked choices.
    Other(DbId),
}

/// Ranked choices plus the assigned value of a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisState {
    pub choices: [Option<DbId>; 3],
    pub assigned: Option<DbId>,
}

impl AxisState {
    pub fn new(
        first: Option<DbId>,
        second: Option<DbId>,
        third: Option<DbId>,
        assigned: Option<DbId>,
    ) -> Self {
        Self {
            choices: [first, second, third],
            assigned,
        }
    }

    /// The trainee's choice at `rank`, `None` if the trainee left it empty.
    pub fn choice(&self, rank: ChoiceRank) -> Option<DbId> {
        self.choices[rank.index()]
    }

    /// A radio is enabled only when the trainee actually made that choice.
    pub fn is_enabled(&self, rank: ChoiceRank) -> bool {
        self.choice(rank).is_some()
    }

    /// The radio at `rank` is checked iff its choice is non-null and equals
    /// the assigned value.
    pub fn is_checked(&self, rank: ChoiceRank) -> bool {
        match (self.choice(rank), self.assigned) {
            (Some(choice), Some(assigned)) => choice == assigned,
            _ => false,
        }
    }

    /// The "other" radio is checked iff a value is assigned that matches
    /// none of the ranked choices.
    pub fn is_other_checked(&self) -> bool {
        self.other_value().is_some()
    }

    /// The assigned value when it falls into the "other" bucket.
    pub fn other_value(&self) -> Option<DbId> {
        let assigned = self.assigned?;
        if self.choices.iter().any(|c| *c == Some(assigned)) {
            None
        } else {
            Some(assigned)
        }
    }

    /// Derive the effective selection. When several choices hold the same
    /// value the highest-ranked one is reported.
    pub fn selection(&self) -> Selection {
        let Some(assigned) = self.assigned else {
            return Selection::Unassigned;
        };
        ChoiceRank::ALL
            .into_iter()
            .find(|rank| self.is_checked(*rank))
            .map(Selection::Choice)
            .unwrap_or(Selection::Other(assigned))
    }

    /// Click on the radio at `rank`.
    ///
    /// Re-clicking the radio bound to the assigned value clears the
    /// assignment. Clicking a disabled radio leaves the state unchanged.
    #[must_use]
    pub fn toggle(self, rank: ChoiceRank) -> Self {
        let Some(choice) = self.choice(rank) else {
            return self;
        };
        let assigned = if self.assigned == Some(choice) {
            None
        } else {
            Some(choice)
        };
        Self { assigned, ..self }
    }

    /// Pick `value` from the "other" dropdown, bypassing the ranked choices.
    #[must_use]
    pub fn select_other(self, value: DbId) -> Self {
        Self {
            assigned: Some(value),
            ..self
        }
    }
}

// ---------------------------------------------------------------------------
// PreferenceRecord
// ---------------------------------------------------------------------------

/// All three axes of one trainee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub trainee_id: DbId,
    pub department: AxisState,
    pub mentor: AxisState,
    pub internal_project: AxisState,
}

impl PreferenceRecord {
    pub fn axis(&self, axis: Axis) -> &AxisState {
        match axis {
            Axis::Department => &self.department,
            Axis::Mentor => &self.mentor,
            Axis::InternalProject => &self.internal_project,
        }
    }

    /// Replace one axis, keeping the other two unchanged.
    #[must_use]
    pub fn with_axis(self, axis: Axis, state: AxisState) -> Self {
        match axis {
            Axis::Department => Self {
                department: state,
                ..self
            },
            Axis::Mentor => Self {
                mentor: state,
                ..self
            },
            Axis::InternalProject => Self {
                internal_project: state,
                ..self
            },
        }
    }

    /// The full three-axis tuple that a write carries.
    pub fn assignment(&self) -> TraineeAssignment {
        TraineeAssignment {
            department_id: self.department.assigned,
            mentor_id: self.mentor.assigned,
            internal_project_id: self.internal_project.assigned,
        }
    }
}

// ---------------------------------------------------------------------------
// TraineeAssignment
// ---------------------------------------------------------------------------

/// Assigned values of all three axes, persisted together.
///
/// Serialized as `{"ipID": .., "mentorID": .., "departmentID": ..}`; `null`
/// clears an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TraineeAssignment {
    #[serde(rename = "ipID")]
    pub internal_project_id: Option<DbId>,
    #[serde(rename = "mentorID")]
    pub mentor_id: Option<DbId>,
    #[serde(rename = "departmentID")]
    pub department_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
