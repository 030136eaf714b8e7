/// Errors from the API client.
///
/// None of them is retried; callers turn them into a user-visible
/// notification.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered 401. The session has already been deauthenticated.
    #[error("Session is no longer authenticated")]
    Unauthorized,

    /// The API answered with another non-2xx status.
    #[error("mdb API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}
