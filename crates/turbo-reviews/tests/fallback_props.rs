//! Property tests for the fallback generator.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use turbo_reviews::fallback::{product_seed, MAX_FALLBACK_REVIEWS};
use turbo_reviews::prelude::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 8, 30, 0).unwrap()
}

fn product_id() -> impl Strategy<Value = ProductId> {
    "[A-Za-z0-9-]{1,40}".prop_map(|raw| ProductId::parse(raw).unwrap())
}

proptest! {
    #[test]
    fn test_same_product_same_output(id in product_id()) {
        let generator = MockReviewGenerator::new();
        prop_assert_eq!(
            generator.product_reviews_at(&id, now()),
            generator.product_reviews_at(&id, now())
        );
    }

    #[test]
    fn test_generated_reviews_are_valid(id in product_id()) {
        let result = MockReviewGenerator::new().product_reviews_at(&id, now());
        let reviews = result.reviews();

        prop_assert!(reviews.len() as u64 <= MAX_FALLBACK_REVIEWS);
        prop_assert_eq!(reviews.len() as u64, product_seed(&id) % (MAX_FALLBACK_REVIEWS + 1));

        for review in reviews {
            prop_assert!((1..=5).contains(&review.rating()));
            prop_assert!(review.is_synthetic());
            prop_assert_eq!(review.status(), ReviewStatus::Approved);
            prop_assert_eq!(review.product_id(), &id);

            let age = now() - review.created_at();
            prop_assert!(age >= Duration::days(1) && age <= Duration::days(30));
        }
    }

    #[test]
    fn test_stats_match_reviews(id in product_id()) {
        let result = MockReviewGenerator::new().product_reviews_at(&id, now());
        let reviews = result.reviews();
        let stats = result.stats();

        prop_assert_eq!(stats.review_count(), reviews.len());
        if reviews.is_empty() {
            prop_assert_eq!(stats.average_rating(), 0.0);
        } else {
            let mean = reviews.iter().map(|r| f64::from(r.rating())).sum::<f64>()
                / reviews.len() as f64;
            prop_assert!((stats.average_rating() - mean).abs() <= 0.05 + f64::EPSILON);
            prop_assert!((0.0..=5.0).contains(&stats.average_rating()));
        }
    }

    #[test]
    fn test_newest_first(id in product_id()) {
        let result = MockReviewGenerator::new().product_reviews_at(&id, now());
        for pair in result.reviews().windows(2) {
            prop_assert!(pair[0].created_at() >= pair[1].created_at());
        }
    }
}
