//! Show the deterministic fallback reviews for a product.

use anyhow::{Context as _, Result};
use turbo_commerce::ProductId;
use turbo_reviews::fallback::product_seed;
use turbo_reviews::MockReviewGenerator;

use super::FallbackArgs;
use crate::context::Context;

/// Run the fallback command.
pub async fn run(args: FallbackArgs, ctx: &Context) -> Result<()> {
    let product_id = ProductId::parse(&args.product_id).context("Invalid product id")?;
    let reviews = MockReviewGenerator::new().product_reviews(&product_id);

    if ctx.output.is_json() {
        ctx.output.json(&reviews);
        return Ok(());
    }

    ctx.output.header(&format!("Fallback reviews for {}", product_id));
    ctx.output.debug(&format!("seed: {:#018x}", product_seed(&product_id)));
    ctx.output.reviews(&reviews, args.content);
    if reviews.reviews().is_empty() {
        ctx.output.info("This product has no fallback reviews");
    }

    Ok(())
}
