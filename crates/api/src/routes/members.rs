use axum::routing::get;
use axum::Router;

use crate::handlers::members;
use crate::state::AppState;

/// Routes mounted at `/members`.
pub fn router() -> Router<AppState> {
    Router::new().route("/departments", get(members::list_departments))
}
