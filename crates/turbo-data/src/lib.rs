//! HTTP client utilities for TurboCommerce.
//!
//! A thin builder over `reqwest` that buffers responses, maps failures to
//! [`FetchError`] and understands the store API's response envelope.
//!
//! # Example
//!
//! ```rust,no_run
//! use turbo_data::FetchClient;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), turbo_data::FetchError> {
//! let client = FetchClient::new("http://localhost:5003/api", Duration::from_secs(15))?
//!     .with_default_header("Accept", "application/json");
//!
//! let cart: Option<serde_json::Value> = client
//!     .get("/users/cart")
//!     .bearer_auth("token")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .envelope()?;
//! # let _ = cart;
//! # Ok(())
//! # }
//! ```

mod envelope;
mod error;
mod request;
mod response;

pub use envelope::ApiEnvelope;
pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// HTTP client for making outbound requests.
#[derive(Debug, Clone)]
pub struct FetchClient {
    inner: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
}

impl FetchClient {
    /// Create a client with a base URL and a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let inner = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into();
        Ok(Self {
            inner,
            base_url: (!base_url.trim().is_empty()).then_some(base_url),
            default_headers: HashMap::new(),
        })
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// The configured base URL.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Post, url)
    }

    /// Create a PUT request.
    pub fn put(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Put, url)
    }

    /// Create a DELETE request.
    pub fn delete(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Delete, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        let mut builder = RequestBuilder::new(method, self.resolve(url.into()));
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }
        ClientRequestBuilder {
            client: self,
            builder,
        }
    }

    fn resolve(&self, url: String) -> String {
        match &self.base_url {
            Some(base) if !url.starts_with("http://") && !url.starts_with("https://") => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
            _ => url,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    client: &'a FetchClient,
    builder: RequestBuilder,
}

impl ClientRequestBuilder<'_> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// The request as built so far.
    pub fn as_request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and buffer the response.
    ///
    /// Non-2xx statuses are returned as a `Response`; call
    /// [`Response::error_for_status`] to turn them into errors.
    pub async fn send(self) -> Result<Response, FetchError> {
        let RequestBuilder {
            method,
            url,
            headers,
            body,
        } = self.builder;

        let mut request = self.client.inner.request(method.to_reqwest(), &url);
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let started = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(method = method.as_str(), url = %url, error = %e, "request failed");
                return Err(e.into());
            }
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(
            method = method.as_str(),
            url = %url,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );

        Ok(Response::new(status, headers, body))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiEnvelope, FetchClient, FetchError, Method, Response};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> FetchClient {
        FetchClient::new("http://localhost:5003/api/", Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_base_url_joined_once() {
        let client = client();
        assert_eq!(
            client.get("/users/cart").as_request().url(),
            "http://localhost:5003/api/users/cart"
        );
        assert_eq!(
            client.get("orders").as_request().url(),
            "http://localhost:5003/api/orders"
        );
    }

    #[test]
    fn test_absolute_url_kept() {
        let client = client();
        let req = client.get("https://other.example/x");
        assert_eq!(req.as_request().url(), "https://other.example/x");
    }

    #[test]
    fn test_default_headers_applied() {
        let client = client().with_default_header("X-Request-Id", "req_1");
        let req = client.delete("/users/cart").bearer_auth("t");
        assert_eq!(req.as_request().header_value("x-request-id"), Some("req_1"));
        assert_eq!(req.as_request().method(), Method::Delete);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = FetchClient::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let err = client.get("/users/cart").send().await.unwrap_err();
        assert!(err.is_network());
    }
}
