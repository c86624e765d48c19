//! HTTP client for the external review API.

use async_trait::async_trait;
use turbo_commerce::ProductId;
use turbo_data::{FetchClient, FetchError};

use crate::config::{ConfigError, ReviewApiOptions};
use crate::dto::ReviewResponseDto;
use crate::telemetry::mask_secret;

/// A source of raw review data for a product.
///
/// [`ReviewApiClient`] is the production implementation; the repository is
/// generic over this trait so tests can script the upstream behavior.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Fetch the raw review payload for `product_id`.
    ///
    /// Every failure (transport, timeout, non-2xx status, undecodable body)
    /// is returned as a [`FetchError`].
    async fn fetch_product_reviews(
        &self,
        product_id: &ProductId,
    ) -> Result<ReviewResponseDto, FetchError>;
}

/// Client for `GET {base_url}/products/{id}/reviews`.
#[derive(Debug, Clone)]
pub struct ReviewApiClient {
    fetch: FetchClient,
}

impl ReviewApiClient {
    /// Build a client from validated options.
    pub fn new(options: &ReviewApiOptions) -> Result<Self, ConfigError> {
        options.validate()?;

        let fetch = FetchClient::new()
            .with_base_url(options.base_url.trim())
            .with_default_header(options.api_key_header_name.trim(), options.api_key.clone())
            .with_default_header("Accept", "application/json")
            .with_timeout(options.timeout());

        tracing::debug!(
            base_url = %options.base_url,
            api_key_header = %options.api_key_header_name,
            api_key = %mask_secret(&options.api_key),
            timeout_seconds = options.timeout_seconds,
            "configured review API client"
        );

        Ok(Self { fetch })
    }

    /// Path of the reviews resource for a product, relative to the base URL.
    pub fn reviews_path(product_id: &ProductId) -> String {
        format!("/products/{}/reviews", encode_path_segment(product_id.as_str()))
    }
}

#[async_trait]
impl ReviewSource for ReviewApiClient {
    async fn fetch_product_reviews(
        &self,
        product_id: &ProductId,
    ) -> Result<ReviewResponseDto, FetchError> {
        tracing::info!(product_id = %product_id, "requesting reviews from external API");

        let result = async {
            let response = self
                .fetch
                .get(Self::reviews_path(product_id))
                .send()
                .await?
                .error_for_status()?;
            response.json::<ReviewResponseDto>()
        }
        .await;

        match &result {
            Ok(body) => {
                tracing::info!(
                    product_id = %product_id,
                    review_count = body.reviews.as_ref().map(Vec::len).unwrap_or(0),
                    "retrieved reviews from external API"
                );
                if tracing::enabled!(tracing::Level::DEBUG) {
                    if let Ok(pretty) = serde_json::to_string_pretty(body) {
                        tracing::debug!(product_id = %product_id, body = %pretty, "received response");
                    }
                }
            }
            Err(err) => {
                tracing::error!(product_id = %product_id, error = %err, "failed to fetch reviews");
            }
        }

        result
    }
}

/// Percent-encode a single URL path segment.
fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
