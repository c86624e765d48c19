//! The review set returned for a product.

use serde::Serialize;

use crate::ids::ProductId;
use crate::reviews::{Review, ReviewStats};

/// Reviews for one product together with their summary.
///
/// Constructed only through [`ProductReviews::from_reviews`], which sorts the
/// reviews newest first and derives the stats from them, so
/// `stats.review_count() == reviews.len()` always holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductReviews {
    reviews: Vec<Review>,
    stats: ReviewStats,
}

impl ProductReviews {
    pub fn from_reviews(product_id: ProductId, mut reviews: Vec<Review>) -> Self {
        reviews.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        let stats = ReviewStats::from_reviews(product_id, &reviews);
        Self { reviews, stats }
    }

    /// Reviews ordered by `created_at`, newest first.
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn stats(&self) -> &ReviewStats {
        &self.stats
    }

    /// Whether any review was synthesized by the fallback generator.
    ///
    /// An empty fallback set reports `false`; callers that must know whether
    /// the upstream answered should ask the repository for the origin.
    pub fn is_synthetic(&self) -> bool {
        self.reviews.iter().any(Review::is_synthetic)
    }

    pub fn into_parts(self) -> (Vec<Review>, ReviewStats) {
        (self.reviews, self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ReviewId;
    use crate::reviews::ReviewStatus;
    use chrono::{Duration, Utc};

    #[test]
    fn test_sorted_newest_first_with_stats() {
        let product_id = ProductId::parse("P1").unwrap();
        let now = Utc::now();
        let review = |rating, days| {
            Review::new(
                ReviewId::generate(),
                product_id.clone(),
                "Alice Brown",
                "Title",
                "Content",
                rating,
                now - Duration::days(days),
                ReviewStatus::Approved,
            )
            .unwrap()
        };

        let result = ProductReviews::from_reviews(
            product_id.clone(),
            vec![review(3, 5), review(5, 1), review(4, 3)],
        );

        let ratings: Vec<u8> = result.reviews().iter().map(Review::rating).collect();
        assert_eq!(ratings, vec![5, 4, 3]);
        assert_eq!(result.stats().review_count(), 3);
        assert_eq!(result.stats().average_rating(), 4.0);
        assert!(!result.is_synthetic());
    }

    #[test]
    fn test_empty() {
        let result = ProductReviews::from_reviews(ProductId::parse("P2").unwrap(), Vec::new());
        assert!(result.reviews().is_empty());
        assert_eq!(result.stats().average_rating(), 0.0);
    }
}
