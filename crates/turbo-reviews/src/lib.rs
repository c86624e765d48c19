//! Product reviews from an external review API, with graceful degradation.
//!
//! The storefront asks an [`ExternalReviewRepository`] for a product's
//! reviews. Calls to the provider go through a [`CircuitBreaker`]; when the
//! circuit is open or a call fails, the repository answers with a
//! deterministic synthetic set from [`MockReviewGenerator`] instead of an
//! error.
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_reviews::prelude::*;
//!
//! let config = ReviewsConfig::resolve(Some(Path::new("reviews.toml")))?;
//! let repository = ExternalReviewRepository::from_options(&config.review_api)?;
//! let service = ReviewService::new(repository);
//!
//! let product_id = ProductId::parse("P1")?;
//! let reviews = service.reviews_for_product(&product_id).await;
//! println!("{} reviews, {:.1} stars", reviews.stats().review_count(), reviews.stats().average_rating());
//! ```

pub mod breaker;
pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod fallback;
pub mod mapping;
pub mod repository;
pub mod service;
pub mod telemetry;

pub use breaker::{
    BreakerConfig, BreakerObserver, BreakerSnapshot, CallPermit, CircuitBreaker, CircuitState,
    TracingObserver,
};
pub use client::{ReviewApiClient, ReviewSource};
pub use config::{generate_default_config, ConfigError, ReviewApiOptions, ReviewsConfig};
pub use dto::{ReviewDto, ReviewResponseDto, ReviewStatsDto};
pub use error::ReviewsError;
pub use fallback::MockReviewGenerator;
pub use mapping::map_response;
pub use repository::{ExternalReviewRepository, ReviewOrigin, ReviewRepository};
pub use service::ReviewService;
pub use telemetry::{init_tracing, LogFormat};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::breaker::{CircuitBreaker, CircuitState};
    pub use crate::client::{ReviewApiClient, ReviewSource};
    pub use crate::config::{ReviewApiOptions, ReviewsConfig};
    pub use crate::error::ReviewsError;
    pub use crate::fallback::MockReviewGenerator;
    pub use crate::repository::{ExternalReviewRepository, ReviewOrigin, ReviewRepository};
    pub use crate::service::ReviewService;

    pub use turbo_commerce::prelude::*;
}
