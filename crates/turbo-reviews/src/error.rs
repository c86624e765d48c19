//! Review subsystem error types.
//!
//! These errors drive the repository's fallback decision; none of them is
//! returned from [`crate::ReviewRepository::get_product_reviews`].

use thiserror::Error;
use turbo_commerce::CommerceError;
use turbo_data::FetchError;

/// Errors inside the review subsystem.
#[derive(Error, Debug)]
pub enum ReviewsError {
    /// Network, timeout, HTTP status or body decoding failure.
    #[error("Review API request failed: {0}")]
    Fetch(#[from] FetchError),

    /// Structurally valid response missing `reviews` or `stats`.
    #[error("Review API returned incomplete data: {0}")]
    IncompleteResponse(String),

    /// The circuit is open; the API was not called.
    #[error("Circuit breaker is open")]
    BreakerOpen,

    /// A mapped review violated a domain invariant.
    #[error("Failed to map review: {0}")]
    Mapping(#[from] CommerceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ReviewsError::Fetch(FetchError::Timeout).to_string(),
            "Review API request failed: Request timed out"
        );
        assert_eq!(
            ReviewsError::IncompleteResponse("stats".into()).to_string(),
            "Review API returned incomplete data: stats"
        );
        assert_eq!(ReviewsError::BreakerOpen.to_string(), "Circuit breaker is open");
    }
}
