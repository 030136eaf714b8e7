//! Repository for trainee preferences and assignments (stored on `members`).

use mdb_core::assignment::TraineeAssignment;
use mdb_core::types::DbId;
use sqlx::PgPool;

use crate::models::trainee::{TraineeChoice, TraineeMotivation};

/// Joins every preference and assignment column with its display name.
///
/// Mentors are shown as `firstname lastname`, departments by their short
/// name and internal projects by their abbreviation.
const CHOICES_QUERY: &str = "
    SELECT
        m.id AS member_id, m.firstname, m.lastname,

        m.mentor_id AS mentor_choice,
        ma.firstname || ' ' || ma.lastname AS mentor_choice_name,
        m.mentor_choice_1 AS mentor_choice1,
        m1.firstname || ' ' || m1.lastname AS mentor_choice1_name,
        m.mentor_choice_2 AS mentor_choice2,
        m2.firstname || ' ' || m2.lastname AS mentor_choice2_name,
        m.mentor_choice_3 AS mentor_choice3,
        m3.firstname || ' ' || m3.lastname AS mentor_choice3_name,

        m.department_id AS department_choice,
        da.short_name AS department_choice_short_name,
        m.department_choice_1 AS department_choice1,
        d1.short_name AS department_choice1_short_name,
        m.department_choice_2 AS department_choice2,
        d2.short_name AS department_choice2_short_name,
        m.department_choice_3 AS department_choice3,
        d3.short_name AS department_choice3_short_name,

        m.internal_project_id AS internal_project_choice,
        pa.abbreviation AS internal_project_choice_short_name,
        m.internal_project_choice_1 AS internal_project_choice1,
        p1.abbreviation AS internal_project_choice1_short_name,
        m.internal_project_choice_1_motivation AS internal_project_choice1_motivation,
        m.internal_project_choice_2 AS internal_project_choice2,
        p2.abbreviation AS internal_project_choice2_short_name,
        m.internal_project_choice_2_motivation AS internal_project_choice2_motivation,
        m.internal_project_choice_3 AS internal_project_choice3,
        p3.abbreviation AS internal_project_choice3_short_name,
        m.internal_project_choice_3_motivation AS internal_project_choice3_motivation
    FROM members m
    LEFT JOIN members ma ON ma.id = m.mentor_id
    LEFT JOIN members m1 ON m1.id = m.mentor_choice_1
    LEFT JOIN members m2 ON m2.id = m.mentor_choice_2
    LEFT JOIN members m3 ON m3.id = m.mentor_choice_3
    LEFT JOIN departments da ON da.id = m.department_id
    LEFT JOIN departments d1 ON d1.id = m.department_choice_1
    LEFT JOIN departments d2 ON d2.id = m.department_choice_2
    LEFT JOIN departments d3 ON d3.id = m.department_choice_3
    LEFT JOIN internal_projects pa ON pa.id = m.internal_project_id
    LEFT JOIN internal_projects p1 ON p1.id = m.internal_project_choice_1
    LEFT JOIN internal_projects p2 ON p2.id = m.internal_project_choice_2
    LEFT JOIN internal_projects p3 ON p3.id = m.internal_project_choice_3
    WHERE m.generation_id = $1
    ORDER BY m.lastname ASC, m.firstname ASC";

pub struct TraineeRepo;

impl TraineeRepo {
    /// List the preference rows of every member of a generation.
    pub async fn list_choices_by_generation(
        pool: &PgPool,
        generation_id: DbId,
    ) -> Result<Vec<TraineeChoice>, sqlx::Error> {
        sqlx::query_as::<_, TraineeChoice>(CHOICES_QUERY)
            .bind(generation_id)
            .fetch_all(pool)
            .await
    }

    /// List the internal-project motivation texts of a generation.
    pub async fn list_motivations_by_generation(
        pool: &PgPool,
        generation_id: DbId,
    ) -> Result<Vec<TraineeMotivation>, sqlx::Error> {
        sqlx::query_as::<_, TraineeMotivation>(
            "SELECT id AS member_id,
                    internal_project_choice_1_motivation AS internal_project1_motivation,
                    internal_project_choice_2_motivation AS internal_project2_motivation,
                    internal_project_choice_3_motivation AS internal_project3_motivation
             FROM members
             WHERE generation_id = $1
             ORDER BY lastname ASC, firstname ASC",
        )
        .bind(generation_id)
        .fetch_all(pool)
        .await
    }

    /// Persist all three assigned values of a trainee in one statement.
    ///
    /// `None` clears an axis. Returns `true` if the trainee row exists.
    pub async fn update_assignment(
        pool: &PgPool,
        trainee_id: DbId,
        assignment: &TraineeAssignment,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE members SET
                department_id = $2,
                mentor_id = $3,
                internal_project_id = $4,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(trainee_id)
        .bind(assignment.department_id)
        .bind(assignment.mentor_id)
        .bind(assignment.internal_project_id)
        .execute(pool)
        .await?;

        tracing::debug!(
            trainee_id,
            department_id = ?assignment.department_id,
            mentor_id = ?assignment.mentor_id,
            internal_project_id = ?assignment.internal_project_id,
            "Trainee assignment written"
        );
        Ok(result.rows_affected() > 0)
    }
}
