//! Session data.

use crate::user::UserProfile;
use crate::AuthError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated session: the bearer token plus who it belongs to.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    token: String,
    /// The user, when sign-in returned one.
    pub user: Option<UserProfile>,
    /// When the session was established.
    pub signed_in_at: DateTime<Utc>,
    /// When the token stops being valid, if known.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthSession {
    /// Create a session from a bearer token.
    pub fn new(token: impl Into<String>) -> Result<Self, AuthError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        Ok(Self {
            token,
            user: None,
            signed_in_at: Utc::now(),
            expires_at: None,
        })
    }

    pub fn with_user(mut self, user: UserProfile) -> Self {
        self.user = Some(user);
        self
    }

    /// Expire the session `ttl` after sign-in.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.expires_at = Some(self.signed_in_at + ttl);
        self
    }

    /// The bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Check if session is expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Utc::now() >= at)
    }

    /// Validate the session, returning error if expired.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.is_expired() {
            Err(AuthError::SessionExpired)
        } else {
            Ok(())
        }
    }
}

// Tokens stay out of logs.
impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .field("signed_in_at", &self.signed_in_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_rejected() {
        assert_eq!(AuthSession::new("  ").unwrap_err(), AuthError::EmptyToken);
    }

    #[test]
    fn test_token_trimmed() {
        let session = AuthSession::new(" abc \n").unwrap();
        assert_eq!(session.token(), "abc");
        assert!(session.validate().is_ok());
    }

    #[test]
    fn test_expiry() {
        let session = AuthSession::new("abc").unwrap().with_ttl(Duration::seconds(-1));
        assert!(session.is_expired());
        assert_eq!(session.validate(), Err(AuthError::SessionExpired));
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = AuthSession::new("secret-token").unwrap();
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret-token"));
    }
}
