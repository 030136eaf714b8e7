//! Permission-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests that lack the
//! required permission with 403.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use mdb_core::error::CoreError;
use mdb_core::permissions::{has_any_permission, PERMISSION_TRAINEE_ADMIN};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the trainee administration permission.
///
/// ```ignore
/// async fn assign(RequireTraineeAdmin(user): RequireTraineeAdmin) -> AppResult<StatusCode> {
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
pub struct RequireTraineeAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireTraineeAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !has_any_permission(&user.permissions, &[PERMISSION_TRAINEE_ADMIN]) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Trainee administration permission required".into(),
            )));
        }
        Ok(RequireTraineeAdmin(user))
    }
}

/// Requires any authenticated member.
///
/// Equivalent to [`AuthUser`], named for routes that only need a login.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
