//! Reconciliation view model of the assignment screen.
//!
//! The board holds one [`PreferenceRecord`] per trainee plus the catalogs
//! backing the "other" dropdowns. Every effective change is applied
//! locally first and then written through the [`AssignmentQueue`] with all
//! three axes. Local state is kept even when the write fails.

use std::collections::HashMap;
use std::sync::Arc;

use mdb_core::assignment::{Axis, AxisState, ChoiceRank, PreferenceRecord};
use mdb_core::types::DbId;

use crate::api::MdbApi;
use crate::error::ClientError;
use crate::models::{Department, Generation, InternalProject, Mentor, TraineeChoice};
use crate::notify::{Notifier, BOARD_LOAD_FAILED, MOTIVATION_NOT_FOUND};
use crate::queue::AssignmentQueue;

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// One ranked-choice radio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub rank: ChoiceRank,
    pub value: Option<DbId>,
    pub label: Option<String>,
    pub enabled: bool,
    pub checked: bool,
}

/// An entry of the "other" dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: DbId,
    pub label: String,
}

/// Everything needed to render one axis of one trainee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisView {
    pub choices: [ChoiceOption; 3],
    pub other_checked: bool,
    /// Value shown in the "other" dropdown, set only when `other_checked`.
    pub other_value: Option<DbId>,
    pub catalog: Vec<CatalogEntry>,
}

/// A motivation statement and the internal-project choice it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Motivation {
    pub rank: ChoiceRank,
    pub project_short_name: Option<String>,
    pub text: Option<String>,
}

/// Data the board is built from.
#[derive(Debug, Clone)]
pub struct BoardData {
    pub generation: Generation,
    pub internal_projects: Vec<InternalProject>,
    pub mentors: Vec<Mentor>,
    pub trainees: Vec<TraineeChoice>,
    pub departments: Vec<Department>,
}

// ---------------------------------------------------------------------------
// AssignmentBoard
// ---------------------------------------------------------------------------

pub struct AssignmentBoard {
    data: BoardData,
    records: HashMap<DbId, PreferenceRecord>,
    queue: AssignmentQueue,
    notifier: Arc<dyn Notifier>,
}

impl AssignmentBoard {
    /// Fetch the current generation, its internal projects, its mentors,
    /// its trainee rows and all departments, in that order.
    pub async fn load(
        api: &MdbApi,
        queue: AssignmentQueue,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ClientError> {
        match Self::fetch(api).await {
            Ok(data) => {
                tracing::info!(
                    generation_id = data.generation.id,
                    trainees = data.trainees.len(),
                    "Assignment board loaded"
                );
                Ok(Self::new(data, queue, notifier))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load assignment board");
                notifier.error(BOARD_LOAD_FAILED);
                Err(e)
            }
        }
    }

    async fn fetch(api: &MdbApi) -> Result<BoardData, ClientError> {
        let generation = api.current_generation().await?;
        let internal_projects = api.internal_projects(generation.id).await?;
        let mentors = api.mentors(generation.id).await?;
        let trainees = api.trainee_choices(generation.id).await?;
        let departments = api.departments().await?;
        Ok(BoardData {
            generation,
            internal_projects,
            mentors,
            trainees,
            departments,
        })
    }

    pub fn new(data: BoardData, queue: AssignmentQueue, notifier: Arc<dyn Notifier>) -> Self {
        let records = data
            .trainees
            .iter()
            .map(|row| (row.member_id, row.preference_record()))
            .collect();
        Self {
            data,
            records,
            queue,
            notifier,
        }
    }

    pub fn generation(&self) -> &Generation {
        &self.data.generation
    }

    /// Trainee rows in display order.
    pub fn trainees(&self) -> &[TraineeChoice] {
        &self.data.trainees
    }

    /// Current local state of a trainee, including unsaved changes.
    pub fn record(&self, trainee_id: DbId) -> Option<&PreferenceRecord> {
        self.records.get(&trainee_id)
    }

    pub fn axis_view(&self, trainee_id: DbId, axis: Axis) -> Option<AxisView> {
        let row = self.row(trainee_id)?;
        let state = self.records.get(&trainee_id)?.axis(axis);
        let labels = choice_labels(row, axis);

        let choices = ChoiceRank::ALL.map(|rank| ChoiceOption {
            rank,
            value: state.choice(rank),
            label: labels[usize::from(rank.position() - 1)].clone(),
            enabled: state.is_enabled(rank),
            checked: state.is_checked(rank),
        });

        Some(AxisView {
            choices,
            other_checked: state.is_other_checked(),
            other_value: state.other_value(),
            catalog: self.catalog(axis),
        })
    }

    /// Click the radio at `rank` of one axis.
    ///
    /// Returns the new axis state, or `None` for an unknown trainee. A
    /// click that changes nothing (disabled radio) issues no write.
    pub fn toggle(&mut self, trainee_id: DbId, axis: Axis, rank: ChoiceRank) -> Option<AxisState> {
        let current = *self.records.get(&trainee_id)?.axis(axis);
        self.apply(trainee_id, axis, current.toggle(rank))
    }

    /// Pick `value` from the "other" dropdown of one axis.
    pub fn select_other(&mut self, trainee_id: DbId, axis: Axis, value: DbId) -> Option<AxisState> {
        let current = *self.records.get(&trainee_id)?.axis(axis);
        self.apply(trainee_id, axis, current.select_other(value))
    }

    /// The three motivation texts of a trainee, each with the short name of
    /// its internal-project choice.
    pub fn motivation(&self, trainee_id: DbId) -> Option<[Motivation; 3]> {
        let Some(row) = self.row(trainee_id) else {
            tracing::warn!(trainee_id, "Motivation requested for unknown trainee");
            self.notifier.error(MOTIVATION_NOT_FOUND);
            return None;
        };
        let short_names = choice_labels(row, Axis::InternalProject);
        let texts = [
            row.internal_project_choice1_motivation.clone(),
            row.internal_project_choice2_motivation.clone(),
            row.internal_project_choice3_motivation.clone(),
        ];
        Some(ChoiceRank::ALL.map(|rank| {
            let i = usize::from(rank.position() - 1);
            Motivation {
                rank,
                project_short_name: short_names[i].clone(),
                text: texts[i].clone(),
            }
        }))
    }

    /// Wait until every submitted write has completed.
    pub async fn settled(&self) {
        self.queue.settled().await;
    }

    // ---- private helpers ----

    fn row(&self, trainee_id: DbId) -> Option<&TraineeChoice> {
        self.data.trainees.iter().find(|r| r.member_id == trainee_id)
    }

    fn apply(&mut self, trainee_id: DbId, axis: Axis, next: AxisState) -> Option<AxisState> {
        let record = self.records.get_mut(&trainee_id)?;
        if *record.axis(axis) == next {
            return Some(next);
        }
        *record = record.with_axis(axis, next);

        tracing::debug!(
            trainee_id,
            axis = axis.as_str(),
            assigned = ?next.assigned,
            "Assignment changed"
        );
        self.queue.submit(trainee_id, record.assignment());
        Some(next)
    }

    fn catalog(&self, axis: Axis) -> Vec<CatalogEntry> {
        match axis {
            Axis::Department => self
                .data
                .departments
                .iter()
                .map(|d| CatalogEntry {
                    id: d.id,
                    label: d.name.clone(),
                })
                .collect(),
            Axis::Mentor => self
                .data
                .mentors
                .iter()
                .map(|m| CatalogEntry {
                    id: m.member_id,
                    label: m.display_name(),
                })
                .collect(),
            Axis::InternalProject => self
                .data
                .internal_projects
                .iter()
                .map(|p| CatalogEntry {
                    id: p.id,
                    label: p.project_name.clone(),
                })
                .collect(),
        }
    }
}

fn choice_labels(row: &TraineeChoice, axis: Axis) -> [Option<String>; 3] {
    match axis {
        Axis::Department => [
            row.department_choice1_short_name.clone(),
            row.department_choice2_short_name.clone(),
            row.department_choice3_short_name.clone(),
        ],
        Axis::Mentor => [
            row.mentor_choice1_name.clone(),
            row.mentor_choice2_name.clone(),
            row.mentor_choice3_name.clone(),
        ],
        Axis::InternalProject => [
            row.internal_project_choice1_short_name.clone(),
            row.internal_project_choice2_short_name.clone(),
            row.internal_project_choice3_short_name.clone(),
        ],
    }
}
