//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Failed to send the request (connection refused, DNS, TLS...).
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response. `message` is the server's `message` field when
    /// the body carried one, else the raw body, else None.
    #[error("HTTP {status}{}", detail(.message))]
    HttpError {
        status: u16,
        message: Option<String>,
    },

    /// 401 from the server; the session is no longer valid.
    #[error("Session is no longer valid")]
    Unauthorized { message: Option<String> },

    /// The server answered 2xx but flagged the call as unsuccessful.
    #[error("{0}")]
    ApiError(String),

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// The message the server sent, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            FetchError::HttpError {
                message: Some(message),
                ..
            } if is_structured(message) => Some(message),
            FetchError::Unauthorized { message } => message.as_deref(),
            FetchError::ApiError(message) => Some(message),
            _ => None,
        }
    }

    /// HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            FetchError::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    /// Whether the request never got an answer.
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::RequestError(_) | FetchError::Timeout)
    }
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(message) if !message.trim().is_empty() => format!(": {}", message),
        _ => String::new(),
    }
}

// Raw HTML error pages are not worth showing a user.
fn is_structured(message: &str) -> bool {
    let trimmed = message.trim_start();
    !trimmed.is_empty() && !trimmed.starts_with('<')
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}
