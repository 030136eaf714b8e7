//! Generation (trainee cohort) model and DTOs.

use mdb_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `generations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub id: DbId,
    pub description: String,
    pub application_start: Option<Timestamp>,
    pub application_end: Option<Timestamp>,
    pub election_start: Option<Timestamp>,
    pub election_end: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGeneration {
    pub description: String,
    pub application_start: Option<Timestamp>,
    pub application_end: Option<Timestamp>,
}

/// Request body for `PATCH /trainees/generations/{id}/set-deadline`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionWindow {
    pub election_start: Timestamp,
    pub election_end: Timestamp,
}
