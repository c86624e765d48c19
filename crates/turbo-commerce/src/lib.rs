//! E-commerce domain types for TurboCommerce.
//!
//! This crate holds the value types shared by the review subsystem:
//!
//! - **Identifiers**: `ProductId`, `ReviewId`
//! - **Reviews**: `Review`, `ReviewStatus`, `ReviewStats`, `ProductReviews`
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_commerce::prelude::*;
//!
//! let product_id = ProductId::parse("P1")?;
//! let review = Review::new(
//!     ReviewId::generate(),
//!     product_id.clone(),
//!     "Jane Smith",
//!     "Great mug",
//!     "Keeps coffee hot for hours.",
//!     5,
//!     chrono::Utc::now(),
//!     ReviewStatus::Approved,
//! )?;
//!
//! let stats = ReviewStats::from_reviews(product_id, &[review]);
//! assert_eq!(stats.review_count(), 1);
//! ```

pub mod error;
pub mod ids;

pub mod reviews;

pub use error::CommerceError;
pub use ids::*;
pub use reviews::{
    round_rating, ProductReviews, Review, ReviewStats, ReviewStatus, SYNTHETIC_TITLE_PREFIX,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;

    // Reviews
    pub use crate::reviews::{
        ProductReviews, Review, ReviewStats, ReviewStatus, SYNTHETIC_TITLE_PREFIX,
    };
}
