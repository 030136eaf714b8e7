//! Route definitions for the `/trainees` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::trainees;
use crate::state::AppState;

/// Routes mounted at `/trainees`.
///
/// ```text
/// GET   /generations                                -> list_generations
/// PATCH /generations/{id}/set-deadline              -> set_deadline
/// GET   /generations/{id}/internal-projects         -> list_internal_projects
/// GET   /generations/{id}/mentors                   -> list_mentors
/// POST  /generations/{id}/add-mentor/{member_id}    -> add_mentor
/// GET   /generations/{id}/trainee-choices           -> list_trainee_choices
/// GET   /generations/{id}/trainee-motivations       -> list_trainee_motivations
/// PATCH /{trainee_id}/assignment                    -> update_assignment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generations", get(trainees::list_generations))
        .route(
            "/generations/{id}/set-deadline",
            patch(trainees::set_deadline),
        )
        .route(
            "/generations/{id}/internal-projects",
            get(trainees::list_internal_projects),
        )
        .route("/generations/{id}/mentors", get(trainees::list_mentors))
        .route(
            "/generations/{id}/add-mentor/{member_id}",
            post(trainees::add_mentor),
        )
        .route(
            "/generations/{id}/trainee-choices",
            get(trainees::list_trainee_choices),
        )
        .route(
            "/generations/{id}/trainee-motivations",
            get(trainees::list_trainee_motivations),
        )
        .route("/{trainee_id}/assignment", patch(trainees::update_assignment))
}
