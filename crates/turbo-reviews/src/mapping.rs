//! Conversion from the provider's wire format into domain reviews.

use turbo_commerce::{ProductId, ProductReviews, Review, ReviewId, ReviewStatus};

use crate::dto::{ReviewDto, ReviewResponseDto, ReviewStatsDto};
use crate::error::ReviewsError;

const UNKNOWN_CUSTOMER: &str = "Unknown";
const UNTITLED: &str = "No Title";
const NO_CONTENT: &str = "No Content";

/// Map a provider response for `product_id` into domain reviews.
///
/// A response without `reviews` or without `stats` is rejected as
/// incomplete. Missing text fields get placeholders, unknown statuses
/// become `Pending`, and ratings outside 1..=5 are clamped. Stats are
/// recomputed from the mapped reviews.
pub fn map_response(
    product_id: &ProductId,
    response: ReviewResponseDto,
) -> Result<ProductReviews, ReviewsError> {
    let ReviewResponseDto { reviews, stats } = response;

    let reviews = reviews.ok_or_else(|| {
        ReviewsError::IncompleteResponse("response has no reviews".to_string())
    })?;
    let stats = stats
        .ok_or_else(|| ReviewsError::IncompleteResponse("response has no stats".to_string()))?;

    let reviews = reviews
        .into_iter()
        .map(|dto| map_review(product_id, dto))
        .collect::<Result<Vec<_>, _>>()?;

    let mapped = ProductReviews::from_reviews(product_id.clone(), reviews);
    check_reported_stats(&mapped, &stats);
    Ok(mapped)
}

fn map_review(product_id: &ProductId, dto: ReviewDto) -> Result<Review, ReviewsError> {
    let id = dto
        .id
        .as_deref()
        .and_then(|raw| ReviewId::parse(raw.trim()).ok())
        .unwrap_or_else(ReviewId::generate);

    let review_product = match non_blank(dto.product_id.as_deref()) {
        Some(raw) => ProductId::parse(raw)?,
        None => product_id.clone(),
    };

    let rating = dto.rating.clamp(1, 5);
    if rating != dto.rating {
        tracing::warn!(
            product_id = %product_id,
            review_id = %id,
            rating = dto.rating,
            "clamped out-of-range rating from review API"
        );
    }

    let review = Review::new(
        id,
        review_product,
        non_blank(dto.customer_name.as_deref()).unwrap_or(UNKNOWN_CUSTOMER),
        non_blank(dto.title.as_deref()).unwrap_or(UNTITLED),
        non_blank(dto.content.as_deref()).unwrap_or(NO_CONTENT),
        rating,
        dto.created_at,
        ReviewStatus::from_external(dto.status.as_deref()),
    )?;
    Ok(review)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn check_reported_stats(mapped: &ProductReviews, reported: &ReviewStatsDto) {
    let derived = mapped.stats();
    let count_matches = usize::try_from(reported.review_count)
        .map(|count| count == derived.review_count())
        .unwrap_or(false);
    let average_matches = (reported.average_rating - derived.average_rating()).abs() < 0.05;

    if !count_matches || !average_matches {
        tracing::debug!(
            product_id = %derived.product_id(),
            reported_count = reported.review_count,
            reported_average = reported.average_rating,
            derived_count = derived.review_count(),
            derived_average = derived.average_rating(),
            "review API stats disagree with returned reviews"
        );
    }
}
