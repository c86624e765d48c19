//! HTTP request builder.

use std::collections::HashMap;

/// A GET request under construction.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
}

impl RequestBuilder {
    /// Create a new GET request for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// The target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Convert into a `reqwest` request bound to `client`.
    pub(crate) fn into_reqwest(self, client: &reqwest::Client) -> reqwest::RequestBuilder {
        self.headers
            .iter()
            .fold(client.get(&self.url), |request, (key, value)| {
                request.header(key.as_str(), value.as_str())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder_headers() {
        let req = RequestBuilder::new("http://example.test/a").header("x-functions-key", "secret");
        assert_eq!(req.headers.get("x-functions-key").map(String::as_str), Some("secret"));
        assert_eq!(req.url(), "http://example.test/a");
    }

    #[test]
    fn test_into_reqwest_carries_headers() {
        let client = reqwest::Client::new();
        let request = RequestBuilder::new("http://example.test/a")
            .header("x-functions-key", "secret")
            .into_reqwest(&client)
            .build()
            .unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().as_str(), "http://example.test/a");
        assert_eq!(request.headers()["x-functions-key"], "secret");
    }
}
