//! Repository for the `generations` and `generation_mentors` tables.

use mdb_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::generation::{CreateGeneration, Generation};
use crate::models::member::Mentor;

const COLUMNS: &str = "id, description, application_start, application_end, \
     election_start, election_end, created_at, updated_at";

/// Provides generation lookups, the election window update and mentor
/// registration.
pub struct GenerationRepo;

impl GenerationRepo {
    /// Insert a new generation, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGeneration,
    ) -> Result<Generation, sqlx::Error> {
        let query = format!(
            "INSERT INTO generations (description, application_start, application_end)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Generation>(&query)
            .bind(&input.description)
            .bind(input.application_start)
            .bind(input.application_end)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Generation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generations WHERE id = $1");
        sqlx::query_as::<_, Generation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The current generation is the one with the highest ID.
    pub async fn find_current(pool: &PgPool) -> Result<Option<Generation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generations ORDER BY id DESC LIMIT 1");
        sqlx::query_as::<_, Generation>(&query)
            .fetch_optional(pool)
            .await
    }

    /// List all generations, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Generation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generations ORDER BY id ASC");
        sqlx::query_as::<_, Generation>(&query).fetch_all(pool).await
    }

    /// Set the election window. Returns `None` if the generation does not exist.
    pub async fn update_election_window(
        pool: &PgPool,
        id: DbId,
        election_start: Timestamp,
        election_end: Timestamp,
    ) -> Result<Option<Generation>, sqlx::Error> {
        let query = format!(
            "UPDATE generations SET
                election_start = $2,
                election_end = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Generation>(&query)
            .bind(id)
            .bind(election_start)
            .bind(election_end)
            .fetch_optional(pool)
            .await
    }

    /// Register a member as mentor of a generation.
    ///
    /// A duplicate registration violates `uq_generation_mentors`.
    pub async fn add_mentor(
        pool: &PgPool,
        generation_id: DbId,
        member_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO generation_mentors (generation_id, member_id) VALUES ($1, $2)")
            .bind(generation_id)
            .bind(member_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// List the mentors of a generation ordered by last name.
    pub async fn list_mentors(
        pool: &PgPool,
        generation_id: DbId,
    ) -> Result<Vec<Mentor>, sqlx::Error> {
        sqlx::query_as::<_, Mentor>(
            "SELECT m.id AS member_id, m.firstname, m.lastname, gm.generation_id
             FROM generation_mentors gm
             JOIN members m ON m.id = gm.member_id
             WHERE gm.generation_id = $1
             ORDER BY m.lastname ASC, m.firstname ASC",
        )
        .bind(generation_id)
        .fetch_all(pool)
        .await
    }
}
