//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No session is active.
    #[error("not signed in")]
    NotSignedIn,

    /// A blank token was offered at sign-in.
    #[error("token must not be empty")]
    EmptyToken,

    /// Session expired.
    #[error("session expired")]
    SessionExpired,

    /// The server rejected the session.
    #[error("session rejected by server")]
    Rejected,

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl AuthError {
    /// Check if this is an authentication failure (as opposed to bad input).
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::NotSignedIn | AuthError::SessionExpired | AuthError::Rejected
        )
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        AuthError::Serialization(e.to_string())
    }
}
