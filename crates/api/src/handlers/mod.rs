pub mod auth;
pub mod members;
pub mod trainees;
