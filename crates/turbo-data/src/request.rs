//! HTTP request builder.

use crate::FetchError;
use serde::Serialize;
use std::collections::HashMap;

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A transport-independent description of an outbound request.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    /// The HTTP method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The full URL, without query string.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// A header value, matched case-insensitively.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// The body, if one was set.
    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body_sets_content_type() {
        let req = RequestBuilder::new(Method::Put, "http://api/users/cart/A")
            .json(&serde_json::json!({"quantity": 3}))
            .unwrap();

        assert_eq!(req.header_value("content-type"), Some("application/json"));
        assert_eq!(req.body_bytes(), Some(br#"{"quantity":3}"#.as_slice()));
    }

    #[test]
    fn test_bearer_auth() {
        let req = RequestBuilder::new(Method::Get, "http://api/users/cart").bearer_auth("tok");
        assert_eq!(req.header_value("Authorization"), Some("Bearer tok"));
    }

    #[test]
    fn test_method_strings() {
        assert_eq!(Method::Delete.as_str(), "DELETE");
        assert_eq!(Method::Post.to_reqwest(), reqwest::Method::POST);
    }
}
