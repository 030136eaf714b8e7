//! Repository for the `members` and `member_permissions` tables.

use mdb_core::permissions::MEMBER_STATUS_TRAINEE;
use mdb_core::types::DbId;
use sqlx::PgPool;

use crate::models::member::{CreateMember, Member, MemberCredentials};

const COLUMNS: &str = "id, firstname, lastname, username, member_status_id, generation_id";

pub struct MemberRepo;

impl MemberRepo {
    /// Insert a new member including its trainee preferences.
    ///
    /// If `member_status_id` is `None`, the member is created as a trainee.
    pub async fn create(pool: &PgPool, input: &CreateMember) -> Result<Member, sqlx::Error> {
        let query = format!(
            "INSERT INTO members (
                firstname, lastname, username, password_hash, member_status_id, generation_id,
                department_choice_1, department_choice_2, department_choice_3,
                mentor_choice_1, mentor_choice_2, mentor_choice_3,
                internal_project_choice_1, internal_project_choice_2, internal_project_choice_3,
                internal_project_choice_1_motivation, internal_project_choice_2_motivation,
                internal_project_choice_3_motivation
             )
             VALUES ($1, $2, $3, $4, $5, $6,
                     $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
             RETURNING {COLUMNS}"
        );
        let [dep1, dep2, dep3] = input.department_choices;
        let [men1, men2, men3] = input.mentor_choices;
        let [ip1, ip2, ip3] = input.internal_project_choices;
        let [mot1, mot2, mot3] = &input.internal_project_motivations;
        sqlx::query_as::<_, Member>(&query)
            .bind(&input.firstname)
            .bind(&input.lastname)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(input.member_status_id.unwrap_or(MEMBER_STATUS_TRAINEE))
            .bind(input.generation_id)
            .bind(dep1)
            .bind(dep2)
            .bind(dep3)
            .bind(men1)
            .bind(men2)
            .bind(men3)
            .bind(ip1)
            .bind(ip2)
            .bind(ip3)
            .bind(mot1)
            .bind(mot2)
            .bind(mot3)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE id = $1");
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find login credentials by username.
    pub async fn find_credentials_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<MemberCredentials>, sqlx::Error> {
        sqlx::query_as::<_, MemberCredentials>(
            "SELECT id, username, password_hash FROM members WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// Permission IDs granted to a member, ascending.
    pub async fn list_permissions(pool: &PgPool, member_id: DbId) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            "SELECT permission_id FROM member_permissions
             WHERE member_id = $1
             ORDER BY permission_id ASC",
        )
        .bind(member_id)
        .fetch_all(pool)
        .await
    }

    /// Grant a permission. Granting an already held permission is a no-op.
    pub async fn grant_permission(
        pool: &PgPool,
        member_id: DbId,
        permission_id: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO member_permissions (member_id, permission_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(member_id)
        .bind(permission_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
