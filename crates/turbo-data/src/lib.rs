//! HTTP client utilities for TurboCommerce.
//!
//! Provides a small, ergonomic API over `reqwest` for calling upstream
//! services with a base URL, default headers and a per-request timeout.
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_data::FetchClient;
//! use std::time::Duration;
//!
//! let client = FetchClient::new()
//!     .with_base_url("https://reviews.example.com/api")
//!     .with_default_header("x-functions-key", api_key)
//!     .with_timeout(Duration::from_secs(30));
//!
//! let body: serde_json::Value = client
//!     .get("/products/P1/reviews")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;

use std::collections::HashMap;
use std::time::Duration;

pub use error::FetchError;
pub use request::RequestBuilder;
pub use response::Response;

/// HTTP client for making outbound requests.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
            default_headers: HashMap::new(),
            timeout: None,
        }
    }

    /// Create a client with a base URL that will be prepended to relative paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Bound every request (connect, send and body read) by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        let builder = self
            .default_headers
            .iter()
            .fold(RequestBuilder::new(self.resolve_url(url.into())), |builder, (key, value)| {
                builder.header(key.clone(), value.clone())
            });

        ClientRequestBuilder {
            http: self.http.clone(),
            builder,
            timeout: self.timeout,
        }
    }

    fn resolve_url(&self, url: String) -> String {
        match &self.base_url {
            Some(base) if !is_absolute(&url) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                url.trim_start_matches('/')
            ),
            _ => url,
        }
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    builder: RequestBuilder,
    timeout: Option<Duration>,
}

impl ClientRequestBuilder {
    /// Send the request and read the full response.
    ///
    /// Non-2xx statuses are returned as a `Response`; call
    /// [`Response::error_for_status`] to turn them into errors.
    pub async fn send(self) -> Result<Response, FetchError> {
        let url = self.builder.url().to_string();

        let mut request = self.builder.into_reqwest(&self.http);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::trace!(method = "GET", url = %url, "sending request");
        let response = request.send().await?;
        let response = Response::read(response).await?;
        tracing::trace!(url = %url, status = response.status, "received response");

        Ok(response)
    }
}
