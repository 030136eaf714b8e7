//! Handlers for the `/members` resource.

use axum::extract::State;
use axum::Json;
use mdb_db::models::department::Department;
use mdb_db::repositories::DepartmentRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// GET /api/v1/members/departments
pub async fn list_departments(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Department>>> {
    let departments = DepartmentRepo::list(&state.pool).await?;
    Ok(Json(departments))
}
