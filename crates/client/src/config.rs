use std::time::Duration;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API including the version prefix,
    /// e.g. `http://localhost:3000/api/v1`.
    pub api_url: String,
    /// Per-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Build a configuration for `api_url` with the default timeout.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            request_timeout_secs: 30,
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                          |
    /// |----------------------------|----------------------------------|
    /// | `MDB_API_URL`              | `http://localhost:3000/api/v1`   |
    /// | `MDB_REQUEST_TIMEOUT_SECS` | `30`                             |
    pub fn from_env() -> Self {
        let api_url =
            std::env::var("MDB_API_URL").unwrap_or_else(|_| "http://localhost:3000/api/v1".into());

        let request_timeout_secs: u64 = std::env::var("MDB_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("MDB_REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            request_timeout_secs,
            ..Self::new(api_url)
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
