//! HTTP response handling.

use crate::{ApiEnvelope, FetchError};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        std::str::from_utf8(&self.body)
            .map(str::to_string)
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Get a header value, matched case-insensitively.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// The server's error message, read from a JSON `message` (or `error`)
    /// field, else the raw body text.
    pub fn error_message(&self) -> Option<String> {
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&self.body) {
            let message = ["message", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(|v| v.as_str()));
            if let Some(message) = message {
                return Some(message.to_string());
            }
        }
        self.text()
            .ok()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = self.error_message();
        if self.status == 401 {
            return Err(FetchError::Unauthorized { message });
        }
        Err(FetchError::HttpError {
            status: self.status,
            message,
        })
    }

    /// Decode the `{success, data, message}` envelope and return its data.
    ///
    /// An empty body counts as a successful envelope with no data, which is
    /// what some acknowledgements send.
    pub fn envelope<T: DeserializeOwned>(&self) -> Result<Option<T>, FetchError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        self.json::<ApiEnvelope<T>>()?.into_data()
    }
}
