//! Handlers for the `/trainees` resource: generations, catalogs, trainee
//! preference rows and the assignment write.
//!
//! Every handler requires the trainee administration permission.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use mdb_core::assignment::TraineeAssignment;
use mdb_core::error::CoreError;
use mdb_core::generation::{is_election_open, validate_election_window};
use mdb_core::types::DbId;
use mdb_db::models::generation::{ElectionWindow, Generation};
use mdb_db::models::internal_project::InternalProject;
use mdb_db::models::member::Mentor;
use mdb_db::models::trainee::{TraineeChoice, TraineeMotivation};
use mdb_db::repositories::{
    DepartmentRepo, GenerationRepo, InternalProjectRepo, MemberRepo, TraineeRepo,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireTraineeAdmin;
use crate::query::CurrentParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A generation plus whether its election window is open right now.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationView {
    #[serde(flatten)]
    pub generation: Generation,
    pub election_open: bool,
}

impl From<Generation> for GenerationView {
    fn from(generation: Generation) -> Self {
        let election_open = is_election_open(
            generation.election_start,
            generation.election_end,
            chrono::Utc::now(),
        );
        Self {
            generation,
            election_open,
        }
    }
}

/// `GET /trainees/generations` answers with a single object when
/// `?current=true`, with an array otherwise.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GenerationsResponse {
    Current(GenerationView),
    All(Vec<GenerationView>),
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_generation(state: &AppState, id: DbId) -> AppResult<Generation> {
    GenerationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Generation",
            id,
        }))
}

// ---------------------------------------------------------------------------
// Generations
// ---------------------------------------------------------------------------

/// GET /api/v1/trainees/generations
///
/// `?current=true` returns the generation with the highest id (404 if there
/// is none).
pub async fn list_generations(
    RequireTraineeAdmin(_user): RequireTraineeAdmin,
    State(state): State<AppState>,
    Query(params): Query<CurrentParams>,
) -> AppResult<Json<GenerationsResponse>> {
    if params.current {
        let current = GenerationRepo::find_current(&state.pool)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        return Ok(Json(GenerationsResponse::Current(current.into())));
    }

    let generations = GenerationRepo::list(&state.pool).await?;
    Ok(Json(GenerationsResponse::All(
        generations.into_iter().map(GenerationView::from).collect(),
    )))
}

/// PATCH /api/v1/trainees/generations/{id}/set-deadline
pub async fn set_deadline(
    RequireTraineeAdmin(user): RequireTraineeAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ElectionWindow>,
) -> AppResult<StatusCode> {
    ensure_generation(&state, id).await?;
    validate_election_window(input.election_start, input.election_end)?;

    GenerationRepo::update_election_window(&state.pool, id, input.election_start, input.election_end)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Generation",
            id,
        }))?;

    tracing::info!(
        generation_id = id,
        member_id = user.member_id,
        election_start = %input.election_start,
        election_end = %input.election_end,
        "Election window updated"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/trainees/generations/{id}/internal-projects
pub async fn list_internal_projects(
    RequireTraineeAdmin(_user): RequireTraineeAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<InternalProject>>> {
    ensure_generation(&state, id).await?;
    let projects = InternalProjectRepo::list_by_generation(&state.pool, id).await?;
    Ok(Json(projects))
}

/// GET /api/v1/trainees/generations/{id}/mentors
pub async fn list_mentors(
    RequireTraineeAdmin(_user): RequireTraineeAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Mentor>>> {
    ensure_generation(&state, id).await?;
    let mentors = GenerationRepo::list_mentors(&state.pool, id).await?;
    Ok(Json(mentors))
}

/// POST /api/v1/trainees/generations/{id}/add-mentor/{member_id}
///
/// Registering the same mentor twice violates `uq_generation_mentors` and
/// answers 409.
pub async fn add_mentor(
    RequireTraineeAdmin(user): RequireTraineeAdmin,
    State(state): State<AppState>,
    Path((id, member_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_generation(&state, id).await?;
    MemberRepo::find_by_id(&state.pool, member_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Member",
            id: member_id,
        }))?;

    GenerationRepo::add_mentor(&state.pool, id, member_id).await?;

    tracing::info!(
        generation_id = id,
        mentor_id = member_id,
        member_id = user.member_id,
        "Mentor added to generation"
    );
    Ok(StatusCode::CREATED)
}

/// GET /api/v1/trainees/generations/{id}/trainee-choices
pub async fn list_trainee_choices(
    RequireTraineeAdmin(_user): RequireTraineeAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<TraineeChoice>>> {
    ensure_generation(&state, id).await?;
    let choices = TraineeRepo::list_choices_by_generation(&state.pool, id).await?;
    Ok(Json(choices))
}

/// GET /api/v1/trainees/generations/{id}/trainee-motivations
pub async fn list_trainee_motivations(
    RequireTraineeAdmin(_user): RequireTraineeAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<TraineeMotivation>>> {
    ensure_generation(&state, id).await?;
    let motivations = TraineeRepo::list_motivations_by_generation(&state.pool, id).await?;
    Ok(Json(motivations))
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// PATCH /api/v1/trainees/{trainee_id}/assignment
///
/// Persists all three assigned values at once; `null` clears an axis. Every
/// non-null reference must exist.
pub async fn update_assignment(
    RequireTraineeAdmin(user): RequireTraineeAdmin,
    State(state): State<AppState>,
    Path(trainee_id): Path<DbId>,
    Json(input): Json<TraineeAssignment>,
) -> AppResult<StatusCode> {
    MemberRepo::find_by_id(&state.pool, trainee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Trainee",
            id: trainee_id,
        }))?;

    if let Some(id) = input.mentor_id {
        MemberRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Mentor",
                id,
            }))?;
    }
    if let Some(id) = input.internal_project_id {
        InternalProjectRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "InternalProject",
                id,
            }))?;
    }
    if let Some(id) = input.department_id {
        DepartmentRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Department",
                id,
            }))?;
    }

    let updated = TraineeRepo::update_assignment(&state.pool, trainee_id, &input).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Trainee",
            id: trainee_id,
        }));
    }

    tracing::info!(
        trainee_id,
        member_id = user.member_id,
        department_id = ?input.department_id,
        mentor_id = ?input.mentor_id,
        internal_project_id = ?input.internal_project_id,
        "Trainee assignment updated"
    );
    Ok(StatusCode::NO_CONTENT)
}
