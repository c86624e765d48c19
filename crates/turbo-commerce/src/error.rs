//! Commerce error types.

use thiserror::Error;

/// Errors raised when constructing domain values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Blank or otherwise unusable product identifier.
    #[error("Invalid product id: {0:?}")]
    InvalidProductId(String),

    /// Review identifier that is not a UUID.
    #[error("Invalid review id: {0:?}")]
    InvalidReviewId(String),

    /// Rating outside 1..=5.
    #[error("Invalid rating: {0} (must be between 1 and 5)")]
    InvalidRating(i64),

    /// Average rating outside 0.0..=5.0.
    #[error("Invalid average rating: {0} (must be between 0 and 5)")]
    InvalidAverageRating(f64),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}
