//! Internal project model and DTOs.

use chrono::NaiveDate;
use mdb_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `internal_projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalProject {
    pub id: DbId,
    pub generation_id: DbId,
    pub project_name: String,
    pub abbreviation: String,
    pub kickoff: Option<NaiveDate>,
}

/// DTO for creating a new internal project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInternalProject {
    pub generation_id: DbId,
    pub project_name: String,
    pub abbreviation: String,
    pub kickoff: Option<NaiveDate>,
}
