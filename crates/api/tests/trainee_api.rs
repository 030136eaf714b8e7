//! HTTP-level integration tests for generations, catalogs, trainee choices
//! and the assignment write.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, get_auth, patch_json_auth, post_auth};
use mdb_db::models::department::{CreateDepartment, Department};
use mdb_db::models::generation::{CreateGeneration, Generation};
use mdb_db::models::internal_project::{CreateInternalProject, InternalProject};
use mdb_db::models::member::{CreateMember, Member};
use mdb_db::repositories::{
    DepartmentRepo, GenerationRepo, InternalProjectRepo, MemberRepo,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

struct Fixture {
    generation: Generation,
    marketing: Department,
    it: Department,
    project: InternalProject,
    mentor: Member,
    trainee: Member,
}

async fn seed(pool: &PgPool) -> Fixture {
    let generation = GenerationRepo::create(
        pool,
        &CreateGeneration {
            description: "WS 23/24".to_string(),
            application_start: None,
            application_end: None,
        },
    )
    .await
    .unwrap();
    let marketing = DepartmentRepo::create(
        pool,
        &CreateDepartment {
            name: "Marketing".to_string(),
            short_name: "MAR".to_string(),
        },
    )
    .await
    .unwrap();
    let it = DepartmentRepo::create(
        pool,
        &CreateDepartment {
            name: "IT".to_string(),
            short_name: "IT".to_string(),
        },
    )
    .await
    .unwrap();
    let project = InternalProjectRepo::create(
        pool,
        &CreateInternalProject {
            generation_id: generation.id,
            project_name: "Lernwerkstatt".to_string(),
            abbreviation: "LEWS".to_string(),
            kickoff: None,
        },
    )
    .await
    .unwrap();
    let mentor = MemberRepo::create(
        pool,
        &CreateMember {
            firstname: "Sam".to_string(),
            lastname: "Kessler".to_string(),
            member_status_id: Some(2),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let trainee = MemberRepo::create(
        pool,
        &CreateMember {
            firstname: "Henry".to_string(),
            lastname: "Larry".to_string(),
            generation_id: Some(generation.id),
            department_choices: [Some(marketing.id), Some(it.id), None],
            mentor_choices: [Some(mentor.id), None, None],
            internal_project_choices: [Some(project.id), None, None],
            internal_project_motivations: [Some("Ich will lernen".to_string()), None, None],
            ..Default::default()
        },
    )
    .await
    .unwrap();

    Fixture {
        generation,
        marketing,
        it,
        project,
        mentor,
        trainee,
    }
}

// ---------------------------------------------------------------------------
// Generations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn current_generation_is_returned_as_object(pool: PgPool) {
    let fixture = seed(&pool).await;
    let newer = GenerationRepo::create(
        &pool,
        &CreateGeneration {
            description: "SS 24".to_string(),
            application_start: None,
            application_end: None,
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool);
    let token = admin_token();

    let response = get_auth(app.clone(), "/api/v1/trainees/generations?current=true", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], newer.id);
    assert_eq!(json["description"], "SS 24");
    assert_eq!(json["electionOpen"], false);

    let response = get_auth(app, "/api/v1/trainees/generations", &token).await;
    let json = body_json(response).await;
    let all = json.as_array().expect("array of generations");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["id"], fixture.generation.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn current_generation_without_rows_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/trainees/generations?current=true", &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_deadline_opens_election(pool: PgPool) {
    let fixture = seed(&pool).await;
    let app = common::build_test_app(pool);
    let token = admin_token();
    let uri = format!(
        "/api/v1/trainees/generations/{}/set-deadline",
        fixture.generation.id
    );

    let start = chrono::Utc::now() - chrono::Duration::days(1);
    let end = chrono::Utc::now() + chrono::Duration::days(1);
    let body = json!({ "electionStart": start, "electionEnd": end });
    let response = patch_json_auth(app.clone(), &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, "/api/v1/trainees/generations?current=true", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["electionOpen"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_deadline_rejects_start_after_end(pool: PgPool) {
    let fixture = seed(&pool).await;
    let app = common::build_test_app(pool);
    let uri = format!(
        "/api/v1/trainees/generations/{}/set-deadline",
        fixture.generation.id
    );

    let body = json!({
        "electionStart": "2024-03-10T00:00:00Z",
        "electionEnd": "2024-03-01T00:00:00Z",
    });
    let response = patch_json_auth(app, &uri, &admin_token(), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_deadline_for_unknown_generation_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "electionStart": "2024-03-01T00:00:00Z",
        "electionEnd": "2024-03-10T00:00:00Z",
    });
    let response = patch_json_auth(
        app,
        "/api/v1/trainees/generations/9999/set-deadline",
        &admin_token(),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_deadline_checks_generation_before_window(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "electionStart": "2024-03-10T00:00:00Z",
        "electionEnd": "2024-03-01T00:00:00Z",
    });
    let response = patch_json_auth(
        app,
        "/api/v1/trainees/generations/9999/set-deadline",
        &admin_token(),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Catalogs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_mentor_then_list_and_reject_duplicate(pool: PgPool) {
    let fixture = seed(&pool).await;
    let app = common::build_test_app(pool);
    let token = admin_token();
    let add_uri = format!(
        "/api/v1/trainees/generations/{}/add-mentor/{}",
        fixture.generation.id, fixture.mentor.id
    );

    let response = post_auth(app.clone(), &add_uri, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_auth(app.clone(), &add_uri, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let list_uri = format!("/api/v1/trainees/generations/{}/mentors", fixture.generation.id);
    let json = body_json(get_auth(app, &list_uri, &token).await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["memberId"], fixture.mentor.id);
    assert_eq!(json[0]["lastname"], "Kessler");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_unknown_mentor_is_404(pool: PgPool) {
    let fixture = seed(&pool).await;
    let app = common::build_test_app(pool);
    let uri = format!(
        "/api/v1/trainees/generations/{}/add-mentor/9999",
        fixture.generation.id
    );
    let response = post_auth(app, &uri, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn internal_projects_and_departments_are_listed(pool: PgPool) {
    let fixture = seed(&pool).await;
    let app = common::build_test_app(pool);
    let token = admin_token();

    let uri = format!(
        "/api/v1/trainees/generations/{}/internal-projects",
        fixture.generation.id
    );
    let json = body_json(get_auth(app.clone(), &uri, &token).await).await;
    assert_eq!(json[0]["id"], fixture.project.id);
    assert_eq!(json[0]["abbreviation"], "LEWS");

    let json = body_json(get_auth(app, "/api/v1/members/departments", &token).await).await;
    let names: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["shortName"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["IT", "MAR"]);
}

// ---------------------------------------------------------------------------
// Trainee choices and motivations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn trainee_choices_carry_ids_and_display_names(pool: PgPool) {
    let fixture = seed(&pool).await;
    let app = common::build_test_app(pool);
    let uri = format!(
        "/api/v1/trainees/generations/{}/trainee-choices",
        fixture.generation.id
    );

    let json = body_json(get_auth(app, &uri, &admin_token()).await).await;
    let row = &json[0];
    assert_eq!(row["memberId"], fixture.trainee.id);
    assert_eq!(row["departmentChoice1"], fixture.marketing.id);
    assert_eq!(row["departmentChoice1ShortName"], "MAR");
    assert_eq!(row["departmentChoice2"], fixture.it.id);
    assert!(row["departmentChoice3"].is_null());
    assert_eq!(row["mentorChoice1Name"], "Sam Kessler");
    assert_eq!(row["internalProjectChoice1Motivation"], "Ich will lernen");
    assert!(row["departmentChoice"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn trainee_motivations_are_listed(pool: PgPool) {
    let fixture = seed(&pool).await;
    let app = common::build_test_app(pool);
    let uri = format!(
        "/api/v1/trainees/generations/{}/trainee-motivations",
        fixture.generation.id
    );

    let json = body_json(get_auth(app, &uri, &admin_token()).await).await;
    assert_eq!(json[0]["memberID"], fixture.trainee.id);
    assert_eq!(json[0]["internalProject1Motivation"], "Ich will lernen");
    assert!(json[0]["internalProject2Motivation"].is_null());
}

// ---------------------------------------------------------------------------
// Assignment write
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn assignment_is_persisted_and_cleared(pool: PgPool) {
    let fixture = seed(&pool).await;
    let app = common::build_test_app(pool);
    let token = admin_token();
    let uri = format!("/api/v1/trainees/{}/assignment", fixture.trainee.id);
    let choices_uri = format!(
        "/api/v1/trainees/generations/{}/trainee-choices",
        fixture.generation.id
    );

    let body = json!({
        "ipID": fixture.project.id,
        "mentorID": fixture.mentor.id,
        "departmentID": fixture.marketing.id,
    });
    let response = patch_json_auth(app.clone(), &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let row = body_json(get_auth(app.clone(), &choices_uri, &token).await).await[0].clone();
    assert_eq!(row["departmentChoice"], fixture.marketing.id);
    assert_eq!(row["departmentChoiceShortName"], "MAR");
    assert_eq!(row["mentorChoice"], fixture.mentor.id);
    assert_eq!(row["internalProjectChoice"], fixture.project.id);

    // Re-click on the first department choice clears only that axis.
    let body = json!({
        "ipID": fixture.project.id,
        "mentorID": fixture.mentor.id,
        "departmentID": null,
    });
    let response = patch_json_auth(app.clone(), &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let row = body_json(get_auth(app, &choices_uri, &token).await).await[0].clone();
    assert!(row["departmentChoice"].is_null());
    assert_eq!(row["mentorChoice"], fixture.mentor.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn assignment_for_unknown_trainee_is_404(pool: PgPool) {
    seed(&pool).await;
    let app = common::build_test_app(pool);
    let body = json!({ "ipID": null, "mentorID": null, "departmentID": null });
    let response =
        patch_json_auth(app, "/api/v1/trainees/9999/assignment", &admin_token(), body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Trainee with id 9999 not found"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn assignment_with_unknown_references_is_404(pool: PgPool) {
    let fixture = seed(&pool).await;
    let app = common::build_test_app(pool);
    let token = admin_token();
    let uri = format!("/api/v1/trainees/{}/assignment", fixture.trainee.id);

    for (body, entity) in [
        (
            json!({ "ipID": null, "mentorID": 9999, "departmentID": null }),
            "Mentor",
        ),
        (
            json!({ "ipID": 9999, "mentorID": null, "departmentID": null }),
            "InternalProject",
        ),
        (
            json!({ "ipID": null, "mentorID": null, "departmentID": 9999 }),
            "Department",
        ),
    ] {
        let response = patch_json_auth(app.clone(), &uri, &token, body).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await["error"],
            format!("{entity} with id 9999 not found")
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn assignment_requires_trainee_admin(pool: PgPool) {
    let fixture = seed(&pool).await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/trainees/{}/assignment", fixture.trainee.id);
    let body = json!({ "ipID": null, "mentorID": null, "departmentID": null });

    let response = patch_json_auth(app, &uri, &common::token_with(3, &[1]), body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
