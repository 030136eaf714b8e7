//! Domain types and pure business rules shared by the mdb crates.

pub mod assignment;
pub mod error;
pub mod generation;
pub mod permissions;
pub mod types;
