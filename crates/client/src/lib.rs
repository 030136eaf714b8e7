//! Headless client for the trainee assignment screen.
//!
//! - [`api`] -- Typed HTTP client for the membership database API.
//! - [`queue`] -- Serialized per-trainee assignment writes.
//! - [`board`] -- The reconciliation view model an admin screen renders.
//! - [`session`] / [`notify`] -- Capabilities injected by the host UI.

pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod queue;
pub mod session;
pub mod writer;
