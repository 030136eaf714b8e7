pub mod auth;
pub mod health;
pub mod members;
pub mod trainees;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                        login (public)
///
/// /members/departments                               list departments (auth)
///
/// /trainees/generations                              list, ?current=true (permission 14)
/// /trainees/generations/{id}/set-deadline            election window (PATCH)
/// /trainees/generations/{id}/internal-projects       list
/// /trainees/generations/{id}/mentors                 list
/// /trainees/generations/{id}/add-mentor/{member_id}  register mentor (POST)
/// /trainees/generations/{id}/trainee-choices         preference rows
/// /trainees/generations/{id}/trainee-motivations     motivation texts
/// /trainees/{trainee_id}/assignment                  write assignment (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/members", members::router())
        .nest("/trainees", trainees::router())
}
