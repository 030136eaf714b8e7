//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?current=true` selects only the current generation.
#[derive(Debug, Default, Deserialize)]
pub struct CurrentParams {
    #[serde(default)]
    pub current: bool,
}
