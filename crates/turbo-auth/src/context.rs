//! Shared handle to the current session.

use crate::{AuthError, AuthSession};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The current session, shared between whoever signs in and whoever makes
/// authenticated calls. Cloning shares the same slot.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<AuthSession>>>,
}

impl SessionContext {
    /// An empty context (signed out).
    pub fn new() -> Self {
        Self::default()
    }

    /// A context that starts signed in.
    pub fn signed_in(session: AuthSession) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(session))),
        }
    }

    /// Store a session, replacing any previous one.
    pub async fn sign_in(&self, session: AuthSession) {
        tracing::info!(user = ?session.user.as_ref().map(|u| &u.id), "signed in");
        *self.inner.write().await = Some(session);
    }

    /// Drop the session. Returns it, if there was one.
    pub async fn sign_out(&self) -> Option<AuthSession> {
        self.inner.write().await.take()
    }

    /// Called when the server answers 401: the session is gone for good.
    pub async fn invalidate(&self) {
        if self.inner.write().await.take().is_some() {
            tracing::warn!("session rejected by server, signed out");
        }
    }

    /// A copy of the current session.
    pub async fn current(&self) -> Option<AuthSession> {
        self.inner.read().await.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.inner.read().await.is_some()
    }

    /// The token to send as `Authorization: Bearer`, if a live session exists.
    /// An expired session is dropped on read.
    pub async fn bearer_token(&self) -> Option<String> {
        {
            let guard = self.inner.read().await;
            match guard.as_ref() {
                None => return None,
                Some(session) if !session.is_expired() => return Some(session.token().to_string()),
                Some(_) => {}
            }
        }
        self.inner.write().await.take();
        tracing::info!("session expired, signed out");
        None
    }

    /// The current session, or `NotSignedIn`.
    pub async fn require(&self) -> Result<AuthSession, AuthError> {
        let session = self.current().await.ok_or(AuthError::NotSignedIn)?;
        session.validate()?;
        Ok(session)
    }
}
