//! Review and moderation status types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::{ProductId, ReviewId};

/// Title prefix carried by every synthetic (fallback) review.
pub const SYNTHETIC_TITLE_PREFIX: &str = "Sample Review:";

/// Moderation status of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReviewStatus {
    /// Awaiting moderation.
    #[default]
    Pending,
    /// Visible to customers.
    Approved,
    /// Hidden by moderation.
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(ReviewStatus::Pending),
            "approved" => Some(ReviewStatus::Approved),
            "rejected" => Some(ReviewStatus::Rejected),
            _ => None,
        }
    }

    /// Lenient parse used for external data: unknown or missing maps to `Pending`.
    pub fn from_external(s: Option<&str>) -> Self {
        s.and_then(Self::from_str).unwrap_or_default()
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer review of a product.
///
/// Reviews are immutable once constructed. `Review::new` enforces the
/// invariants: text fields are non-blank and the rating is within 1..=5.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    id: ReviewId,
    product_id: ProductId,
    customer_name: String,
    title: String,
    content: String,
    rating: u8,
    created_at: DateTime<Utc>,
    status: ReviewStatus,
}

impl Review {
    /// Create a validated review.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ReviewId,
        product_id: ProductId,
        customer_name: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        rating: i64,
        created_at: DateTime<Utc>,
        status: ReviewStatus,
    ) -> Result<Self, CommerceError> {
        let customer_name = non_blank("customer name", customer_name.into())?;
        let title = non_blank("title", title.into())?;
        let content = non_blank("content", content.into())?;

        if !(1..=5).contains(&rating) {
            return Err(CommerceError::InvalidRating(rating));
        }

        Ok(Self {
            id,
            product_id,
            customer_name,
            title,
            content,
            rating: rating as u8,
            created_at,
            status,
        })
    }

    pub fn id(&self) -> ReviewId {
        self.id
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Star rating, always within 1..=5.
    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> ReviewStatus {
        self.status
    }

    /// Whether this review was synthesized by the fallback generator.
    pub fn is_synthetic(&self) -> bool {
        self.title.starts_with(SYNTHETIC_TITLE_PREFIX)
    }

    /// Render star rating as text.
    pub fn render_stars(&self) -> String {
        let filled = self.rating as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

fn non_blank(field: &str, value: String) -> Result<String, CommerceError> {
    if value.trim().is_empty() {
        return Err(CommerceError::ValidationError(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(value)
}
