//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod department_repo;
pub mod generation_repo;
pub mod internal_project_repo;
pub mod member_repo;
pub mod trainee_repo;

pub use department_repo::DepartmentRepo;
pub use generation_repo::GenerationRepo;
pub use internal_project_repo::InternalProjectRepo;
pub use member_repo::MemberRepo;
pub use trainee_repo::TraineeRepo;
