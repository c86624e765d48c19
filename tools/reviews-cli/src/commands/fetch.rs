//! Fetch reviews through the circuit-breaker-protected repository.

use anyhow::{Context as _, Result};
use serde::Serialize;
use turbo_commerce::{ProductId, ProductReviews};
use turbo_reviews::{BreakerSnapshot, ExternalReviewRepository, ReviewOrigin, ReviewService};

use super::FetchArgs;
use crate::context::Context;

#[derive(Serialize)]
struct FetchReport<'a> {
    attempt: u32,
    origin: ReviewOrigin,
    breaker: BreakerSnapshot,
    reviews: &'a ProductReviews,
}

/// Run the fetch command.
pub async fn run(args: FetchArgs, ctx: &Context) -> Result<()> {
    let product_id = ProductId::parse(&args.product_id).context("Invalid product id")?;
    let config = ctx.reviews_config()?;
    ctx.output.debug(&format!("Review API options: {:?}", config.review_api));

    let repository = ExternalReviewRepository::from_options(&config.review_api)?;
    let service = ReviewService::new(repository);

    let attempts = args.repeat.max(1);
    for attempt in 1..=attempts {
        let spinner = ctx
            .output
            .spinner(&format!("Fetching reviews for {} ({}/{})", product_id, attempt, attempts));
        let (reviews, origin) = service.reviews_with_origin(&product_id).await;
        spinner.finish_and_clear();

        let breaker = service.repository().breaker().snapshot();

        if ctx.output.is_json() {
            ctx.output.json(&FetchReport {
                attempt,
                origin,
                breaker,
                reviews: &reviews,
            });
            continue;
        }

        ctx.output.header(&format!("Reviews for {} (attempt {})", product_id, attempt));
        if origin.is_fallback() {
            ctx.output.warn("Review API unavailable; showing fallback reviews");
        }
        ctx.output.reviews(&reviews, args.content);
        ctx.output.kv("source", origin.as_str());
        ctx.output.kv("circuit", breaker.state.as_str());
        ctx.output
            .debug(&format!("consecutive failures: {}", breaker.consecutive_failures));
    }

    Ok(())
}
