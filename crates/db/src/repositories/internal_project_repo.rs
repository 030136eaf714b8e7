//! Repository for the `internal_projects` table.

use mdb_core::types::DbId;
use sqlx::PgPool;

use crate::models::internal_project::{CreateInternalProject, InternalProject};

const COLUMNS: &str = "id, generation_id, project_name, abbreviation, kickoff";

pub struct InternalProjectRepo;

impl InternalProjectRepo {
    /// Insert a new internal project, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateInternalProject,
    ) -> Result<InternalProject, sqlx::Error> {
        let query = format!(
            "INSERT INTO internal_projects (generation_id, project_name, abbreviation, kickoff)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InternalProject>(&query)
            .bind(input.generation_id)
            .bind(&input.project_name)
            .bind(&input.abbreviation)
            .bind(input.kickoff)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<InternalProject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM internal_projects WHERE id = $1");
        sqlx::query_as::<_, InternalProject>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the internal projects of a generation, ordered by ID.
    pub async fn list_by_generation(
        pool: &PgPool,
        generation_id: DbId,
    ) -> Result<Vec<InternalProject>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM internal_projects
             WHERE generation_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, InternalProject>(&query)
            .bind(generation_id)
            .fetch_all(pool)
            .await
    }
}
