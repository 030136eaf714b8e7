//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! rows the repositories return, plus `Deserialize` DTOs for inserts where
//! the API or tests create rows.

pub mod department;
pub mod generation;
pub mod internal_project;
pub mod member;
pub mod trainee;
