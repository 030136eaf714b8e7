//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::Json;
use mdb_core::error::CoreError;
use mdb_core::types::DbId;
use mdb_db::repositories::MemberRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub member_id: DbId,
    pub username: String,
    pub permissions: Vec<i32>,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns an access token carrying
/// the member's permission ids.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let credentials = MemberRepo::find_credentials_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    // Members imported without a password cannot log in.
    let Some(password_hash) = credentials.password_hash.as_deref() else {
        return Err(invalid_credentials());
    };

    let password_valid = verify_password(&input.password, password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(member_id = credentials.id, "Rejected login with wrong password");
        return Err(invalid_credentials());
    }

    let permissions = MemberRepo::list_permissions(&state.pool, credentials.id).await?;
    let access_token = generate_access_token(credentials.id, &permissions, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(member_id = credentials.id, "Member logged in");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        member_id: credentials.id,
        username: credentials.username,
        permissions,
    }))
}
