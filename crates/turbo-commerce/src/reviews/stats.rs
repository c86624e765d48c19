//! Aggregated review statistics.

use serde::Serialize;

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::reviews::Review;

/// Summary of the reviews returned for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewStats {
    product_id: ProductId,
    average_rating: f64,
    review_count: usize,
}

impl ReviewStats {
    /// Create stats from already-aggregated values.
    pub fn new(
        product_id: ProductId,
        average_rating: f64,
        review_count: usize,
    ) -> Result<Self, CommerceError> {
        if !(0.0..=5.0).contains(&average_rating) {
            return Err(CommerceError::InvalidAverageRating(average_rating));
        }
        Ok(Self {
            product_id,
            average_rating,
            review_count,
        })
    }

    /// Summarize a set of reviews.
    ///
    /// The average is rounded to one decimal place and is `0.0` for an
    /// empty set.
    pub fn from_reviews(product_id: ProductId, reviews: &[Review]) -> Self {
        let average_rating = if reviews.is_empty() {
            0.0
        } else {
            let total: u32 = reviews.iter().map(|r| u32::from(r.rating())).sum();
            round_rating(f64::from(total) / reviews.len() as f64)
        };

        Self {
            product_id,
            average_rating,
            review_count: reviews.len(),
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn average_rating(&self) -> f64 {
        self.average_rating
    }

    pub fn review_count(&self) -> usize {
        self.review_count
    }
}

/// Round a rating to one decimal place.
pub fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ReviewId;
    use crate::reviews::ReviewStatus;
    use chrono::Utc;

    fn product() -> ProductId {
        ProductId::parse("prod-1").unwrap()
    }

    fn rated(rating: i64) -> Review {
        Review::new(
            ReviewId::generate(),
            product(),
            "Bob Johnson",
            "Title",
            "Content",
            rating,
            Utc::now(),
            ReviewStatus::Approved,
        )
        .unwrap()
    }

    #[test]
    fn test_stats_empty() {
        let stats = ReviewStats::from_reviews(product(), &[]);
        assert_eq!(stats.review_count(), 0);
        assert_eq!(stats.average_rating(), 0.0);
    }

    #[test]
    fn test_stats_average() {
        let stats = ReviewStats::from_reviews(product(), &[rated(5), rated(3)]);
        assert_eq!(stats.review_count(), 2);
        assert_eq!(stats.average_rating(), 4.0);
    }

    #[test]
    fn test_stats_average_rounded() {
        let stats = ReviewStats::from_reviews(product(), &[rated(5), rated(4), rated(4)]);
        assert_eq!(stats.average_rating(), 4.3);
    }

    #[test]
    fn test_stats_new_validates_average() {
        assert!(ReviewStats::new(product(), 5.1, 1).is_err());
        assert!(ReviewStats::new(product(), -0.1, 1).is_err());
        assert!(ReviewStats::new(product(), 3.5, 2).is_ok());
    }

    #[test]
    fn test_round_rating() {
        assert_eq!(round_rating(3.666), 3.7);
        assert_eq!(round_rating(3.64), 3.6);
        assert_eq!(round_rating(0.0), 0.0);
    }
}
