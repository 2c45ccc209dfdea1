//! Storefront error types.

use thiserror::Error;
use turbo_auth::AuthError;
use turbo_commerce::error::CommerceError;
use turbo_data::FetchError;

/// Shown when a failed order carries no usable message.
pub const ORDER_FAILED: &str = "Failed to place order";

/// Errors surfaced by the cart manager and order assembler.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorefrontError {
    /// Local validation failed; nothing was sent.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// A remote call failed.
    #[error(transparent)]
    Remote(#[from] FetchError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Configuration could not be read.
    #[error("configuration error: {0}")]
    Config(String),
}

impl StorefrontError {
    /// The text to show the user: the server's own message when it sent a
    /// non-blank one, else this error's message, else [`ORDER_FAILED`].
    pub fn user_message(&self) -> String {
        let server = match self {
            StorefrontError::Remote(e) => e.server_message().filter(|m| !m.trim().is_empty()),
            _ => None,
        };
        let message = server.map_or_else(|| self.to_string(), str::to_string);
        if message.trim().is_empty() {
            ORDER_FAILED.to_string()
        } else {
            message
        }
    }

    /// Whether the error was caught before any remote call.
    pub fn is_validation(&self) -> bool {
        matches!(self, StorefrontError::Commerce(e) if e.is_validation())
    }

    /// Whether the server rejected the session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, StorefrontError::Remote(FetchError::Unauthorized { .. }))
    }
}

impl From<toml::de::Error> for StorefrontError {
    fn from(e: toml::de::Error) -> Self {
        StorefrontError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for StorefrontError {
    fn from(e: serde_json::Error) -> Self {
        StorefrontError::Config(e.to_string())
    }
}
