//! Authentication session capability.

use std::sync::RwLock;

/// The host UI's login session.
///
/// The client reads the bearer token from it and calls
/// [`Session::deauthenticate`] when the API answers 401.
pub trait Session: Send + Sync {
    /// The current access token, `None` when logged out.
    fn bearer_token(&self) -> Option<String>;

    /// Drop the current login. The host UI routes back to its login screen.
    fn deauthenticate(&self);
}

/// In-memory session holding a single token.
#[derive(Debug, Default)]
pub struct StaticSession {
    token: RwLock<Option<String>>,
}

impl StaticSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    /// Replace the token, e.g. after a successful login.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.into());
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer_token().is_some()
    }
}

impl Session for StaticSession {
    fn bearer_token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn deauthenticate(&self) {
        tracing::info!("Session deauthenticated");
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}
