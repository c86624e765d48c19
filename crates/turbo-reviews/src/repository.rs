//! Review repository guarded by a circuit breaker.
//!
//! [`ExternalReviewRepository`] is the only way callers obtain reviews. It
//! never fails: any upstream problem (open circuit, timeout, transport or
//! status error, malformed payload) degrades to the deterministic fallback
//! set from [`MockReviewGenerator`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use turbo_commerce::{ProductId, ProductReviews};
use turbo_data::FetchError;

use crate::breaker::{BreakerConfig, BreakerObserver, CircuitBreaker};
use crate::client::{ReviewApiClient, ReviewSource};
use crate::config::{ConfigError, ReviewApiOptions};
use crate::error::ReviewsError;
use crate::fallback::MockReviewGenerator;
use crate::mapping::map_response;

/// Read access to product reviews.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Reviews and stats for `product_id`. Always returns a result.
    async fn get_product_reviews(&self, product_id: &ProductId) -> ProductReviews;
}

/// Where a set of reviews came from.
///
/// A fallback set may be empty, so [`ProductReviews::is_synthetic`] alone
/// cannot tell a degraded answer from a product without reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOrigin {
    Api,
    Fallback,
}

impl ReviewOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewOrigin::Api => "api",
            ReviewOrigin::Fallback => "fallback",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ReviewOrigin::Fallback)
    }
}

/// Repository backed by an external review source.
#[derive(Debug)]
pub struct ExternalReviewRepository<S = ReviewApiClient> {
    source: S,
    breaker: CircuitBreaker,
    fallback: MockReviewGenerator,
    call_timeout: Duration,
}

impl ExternalReviewRepository<ReviewApiClient> {
    /// Build the production repository: HTTP client plus breaker from options.
    pub fn from_options(options: &ReviewApiOptions) -> Result<Self, ConfigError> {
        let client = ReviewApiClient::new(options)?;
        Ok(Self::new(client, options))
    }
}

impl<S: ReviewSource> ExternalReviewRepository<S> {
    /// Wrap `source` with a breaker and call timeout taken from `options`.
    pub fn new(source: S, options: &ReviewApiOptions) -> Self {
        Self {
            source,
            breaker: CircuitBreaker::new(BreakerConfig::from_options(options)),
            fallback: MockReviewGenerator::new(),
            call_timeout: options.timeout(),
        }
    }

    /// Replace the breaker transition observer.
    pub fn with_observer(mut self, observer: Arc<dyn BreakerObserver>) -> Self {
        self.breaker = self.breaker.with_observer(observer);
        self
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch through the breaker, surfacing the reason a fallback is needed.
    pub async fn try_get_product_reviews(
        &self,
        product_id: &ProductId,
    ) -> Result<ProductReviews, ReviewsError> {
        let permit = self.breaker.try_acquire()?;

        let result = match tokio::time::timeout(
            self.call_timeout,
            self.source.fetch_product_reviews(product_id),
        )
        .await
        {
            Ok(Ok(response)) => map_response(product_id, response),
            Ok(Err(err)) => Err(ReviewsError::Fetch(err)),
            Err(_) => Err(ReviewsError::Fetch(FetchError::Timeout)),
        };

        match &result {
            Ok(_) => permit.succeed(),
            Err(err) => permit.fail(err),
        }
        result
    }

    /// Reviews for `product_id` and whether the fallback produced them.
    pub async fn get_product_reviews_with_origin(
        &self,
        product_id: &ProductId,
    ) -> (ProductReviews, ReviewOrigin) {
        match self.try_get_product_reviews(product_id).await {
            Ok(reviews) => (reviews, ReviewOrigin::Api),
            Err(ReviewsError::BreakerOpen) => {
                tracing::warn!(
                    product_id = %product_id,
                    "circuit open, serving fallback reviews"
                );
                (self.fallback.product_reviews(product_id), ReviewOrigin::Fallback)
            }
            Err(err) => {
                tracing::error!(
                    product_id = %product_id,
                    error = %err,
                    "review API call failed, serving fallback reviews"
                );
                (self.fallback.product_reviews(product_id), ReviewOrigin::Fallback)
            }
        }
    }
}

#[async_trait]
impl<S: ReviewSource> ReviewRepository for ExternalReviewRepository<S> {
    async fn get_product_reviews(&self, product_id: &ProductId) -> ProductReviews {
        self.get_product_reviews_with_origin(product_id).await.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breaker::CircuitState;
    use crate::dto::{ReviewResponseDto, ReviewStatsDto};

    struct Static(Result<ReviewResponseDto, FetchError>);

    #[async_trait]
    impl ReviewSource for Static {
        async fn fetch_product_reviews(
            &self,
            _product_id: &ProductId,
        ) -> Result<ReviewResponseDto, FetchError> {
            match &self.0 {
                Ok(dto) => Ok(dto.clone()),
                Err(err) => Err(FetchError::ConnectionError(err.to_string())),
            }
        }
    }

    fn options() -> ReviewApiOptions {
        ReviewApiOptions::new("http://localhost:7071/api", "key")
    }

    #[tokio::test]
    async fn test_success_keeps_circuit_closed() {
        let response = ReviewResponseDto {
            reviews: Some(Vec::new()),
            stats: Some(ReviewStatsDto {
                product_id: Some("P1".into()),
                average_rating: 0.0,
                review_count: 0,
            }),
        };
        let repo = ExternalReviewRepository::new(Static(Ok(response)), &options());
        let id = ProductId::parse("P1").unwrap();

        let result = repo.get_product_reviews(&id).await;
        assert!(result.reviews().is_empty());
        assert_eq!(repo.breaker().state(), CircuitState::Closed);
    }

    #[tokio::test]
    async fn test_incomplete_response_counts_as_failure() {
        let repo =
            ExternalReviewRepository::new(Static(Ok(ReviewResponseDto::default())), &options());
        let id = ProductId::parse("P1").unwrap();

        let err = repo.try_get_product_reviews(&id).await.unwrap_err();
        assert!(matches!(err, ReviewsError::IncompleteResponse(_)));
        assert_eq!(repo.breaker().snapshot().consecutive_failures, 1);
    }

    fn refused() -> Static {
        Static(Err(FetchError::ConnectionError("refused".into())))
    }

    #[tokio::test]
    async fn test_failure_serves_fallback() {
        let repo = ExternalReviewRepository::new(refused(), &options());
        let id = ProductId::parse("P2").unwrap();

        let result = repo.get_product_reviews(&id).await;
        let expected = MockReviewGenerator::new().product_reviews(&id);
        assert!(!result.reviews().is_empty());
        assert!(result.is_synthetic());
        assert_eq!(result.reviews().len(), expected.reviews().len());
        assert_eq!(result.stats().average_rating(), expected.stats().average_rating());
    }

    #[tokio::test]
    async fn test_empty_fallback_reports_origin() {
        let repo = ExternalReviewRepository::new(refused(), &options());
        // "P1" hashes to a fallback set of zero reviews.
        let id = ProductId::parse("P1").unwrap();

        let (result, origin) = repo.get_product_reviews_with_origin(&id).await;
        assert!(result.reviews().is_empty());
        assert!(!result.is_synthetic());
        assert_eq!(origin, ReviewOrigin::Fallback);
    }

    #[tokio::test]
    async fn test_success_reports_api_origin() {
        let response = ReviewResponseDto {
            reviews: Some(Vec::new()),
            stats: Some(ReviewStatsDto {
                product_id: Some("P1".into()),
                average_rating: 0.0,
                review_count: 0,
            }),
        };
        let repo = ExternalReviewRepository::new(Static(Ok(response)), &options());
        let id = ProductId::parse("P1").unwrap();

        let (_, origin) = repo.get_product_reviews_with_origin(&id).await;
        assert_eq!(origin, ReviewOrigin::Api);
        assert_eq!(origin.as_str(), "api");
    }
}
