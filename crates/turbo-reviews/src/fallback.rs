//! Deterministic synthetic reviews served when the review API is unavailable.
//!
//! Everything about a product's fallback set (how many reviews, their
//! ratings, authors, texts, ages and ids) derives from a stable hash of the
//! product id. A shopper retrying a failed page therefore sees the same
//! reviews every time, across calls and across process restarts.
//!
//! The stream comes from `ChaCha8Rng`, whose output is fixed for a given
//! seed, and draws are taken straight from `next_u32`/`fill_bytes` rather
//! than through `rand`'s distributions, which may change between releases.

use chrono::{DateTime, Duration, Utc};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use turbo_commerce::{
    ProductId, ProductReviews, Review, ReviewId, ReviewStatus, SYNTHETIC_TITLE_PREFIX,
};
use uuid::Builder;

/// Upper bound (inclusive) on generated reviews per product.
pub const MAX_FALLBACK_REVIEWS: u64 = 5;

const CUSTOMER_NAMES: [&str; 5] = [
    "John Doe",
    "Jane Smith",
    "Bob Johnson",
    "Alice Brown",
    "Charlie Davis",
];

const REVIEW_CONTENTS: [&str; 5] = [
    "I've been using this for weeks and it's fantastic.",
    "Exactly what I was looking for. High quality.",
    "The product is decent but shipping took too long.",
    "Works as advertised, very happy with my purchase.",
    "Good value for the money, would buy again.",
];

/// Generator of stable, clearly-labelled synthetic reviews.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockReviewGenerator;

impl MockReviewGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Synthetic reviews for `product_id`, dated relative to the current time.
    pub fn product_reviews(&self, product_id: &ProductId) -> ProductReviews {
        self.product_reviews_at(product_id, Utc::now())
    }

    /// Synthetic reviews for `product_id`, dated relative to `now`.
    pub fn product_reviews_at(&self, product_id: &ProductId, now: DateTime<Utc>) -> ProductReviews {
        let seed = product_seed(product_id);
        let count = review_count_for_seed(seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let reviews = (0..count)
            .filter_map(|index| generate_review(&mut rng, product_id, index, now))
            .collect();

        ProductReviews::from_reviews(product_id.clone(), reviews)
    }
}

fn generate_review(
    rng: &mut ChaCha8Rng,
    product_id: &ProductId,
    index: u64,
    now: DateTime<Utc>,
) -> Option<Review> {
    let day_offset = i64::from(draw(rng, 30)) + 1;
    let rating = rating_for_roll(draw(rng, 100) + 1);
    let customer_name = CUSTOMER_NAMES[draw(rng, CUSTOMER_NAMES.len() as u32) as usize];
    let content = REVIEW_CONTENTS[draw(rng, REVIEW_CONTENTS.len() as u32) as usize];

    let mut id_bytes = [0u8; 16];
    rng.fill_bytes(&mut id_bytes);
    let id = ReviewId::new(Builder::from_random_bytes(id_bytes).into_uuid());

    // Inputs are constants and in-range draws, so construction cannot fail.
    Review::new(
        id,
        product_id.clone(),
        customer_name,
        format!("{} {} for Product", SYNTHETIC_TITLE_PREFIX, index + 1),
        content,
        rating,
        now - Duration::days(day_offset),
        ReviewStatus::Approved,
    )
    .ok()
}

/// Value in `0..bound` from the next word of the stream.
fn draw(rng: &mut ChaCha8Rng, bound: u32) -> u32 {
    rng.next_u32() % bound
}

/// Map a uniform roll in 1..=100 onto the star-rating distribution.
///
/// 1-10 → 1, 11-25 → 2, 26-50 → 3, 51-80 → 4, 81-100 → 5.
pub fn rating_for_roll(roll: u32) -> i64 {
    match roll {
        0..=10 => 1,
        11..=25 => 2,
        26..=50 => 3,
        51..=80 => 4,
        _ => 5,
    }
}

/// Stable 64-bit FNV-1a hash of a product id.
pub fn product_seed(product_id: &ProductId) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    product_id
        .as_str()
        .bytes()
        .fold(OFFSET_BASIS, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}

fn review_count_for_seed(seed: u64) -> u64 {
    seed % (MAX_FALLBACK_REVIEWS + 1)
}
