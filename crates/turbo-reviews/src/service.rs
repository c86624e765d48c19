//! Application-facing review queries.

use turbo_commerce::{ProductId, ProductReviews};

use crate::client::ReviewSource;
use crate::repository::{ExternalReviewRepository, ReviewOrigin, ReviewRepository};

/// Thin facade over a [`ReviewRepository`] for page handlers.
#[derive(Debug, Clone)]
pub struct ReviewService<R> {
    repository: R,
}

impl<R: ReviewRepository> ReviewService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Reviews and stats for a product.
    pub async fn reviews_for_product(&self, product_id: &ProductId) -> ProductReviews {
        self.repository.get_product_reviews(product_id).await
    }

    /// Average rating (one decimal place), `0.0` when there are no reviews.
    pub async fn average_rating(&self, product_id: &ProductId) -> f64 {
        self.reviews_for_product(product_id)
            .await
            .stats()
            .average_rating()
    }

    pub async fn review_count(&self, product_id: &ProductId) -> usize {
        self.reviews_for_product(product_id)
            .await
            .stats()
            .review_count()
    }
}

impl<S: ReviewSource> ReviewService<ExternalReviewRepository<S>> {
    /// Reviews for a product, tagged with whether the API or the fallback answered.
    pub async fn reviews_with_origin(
        &self,
        product_id: &ProductId,
    ) -> (ProductReviews, ReviewOrigin) {
        self.repository.get_product_reviews_with_origin(product_id).await
    }
}
