//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated member from a JWT Bearer token.
//! - [`rbac::RequireTraineeAdmin`] -- Requires the trainee administration permission.
//! - [`rbac::RequireAuth`] -- Requires any authenticated member.

pub mod auth;
pub mod rbac;
