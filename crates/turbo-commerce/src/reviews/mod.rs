//! Product reviews: individual reviews, moderation status and summary stats.

mod product_reviews;
mod review;
mod stats;

pub use product_reviews::ProductReviews;
pub use review::{Review, ReviewStatus, SYNTHETIC_TITLE_PREFIX};
pub use stats::{round_rating, ReviewStats};
