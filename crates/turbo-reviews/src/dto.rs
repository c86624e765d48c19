//! Wire representation of the external review API.
//!
//! Everything except `rating` and `createdAt` is optional here; validation
//! and defaulting happen in [`crate::mapping`].

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `GET /products/{id}/reviews`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponseDto {
    #[serde(default)]
    pub reviews: Option<Vec<ReviewDto>>,
    #[serde(default)]
    pub stats: Option<ReviewStatsDto>,
}

/// A single review as sent by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    pub rating: i64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Aggregate stats as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStatsDto {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub review_count: i64,
}

/// Accept RFC 3339 timestamps, or ISO 8601 without an offset (taken as UTC).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid timestamp: {:?}", raw))
    })
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_deserialize_full_response() {
        let json = r#"{
            "reviews": [{
                "id": "3f2504e0-4f89-11d3-9a0c-0305e82c3301",
                "productId": "P1",
                "customerName": "Alice Brown",
                "title": "Great",
                "content": "Really great.",
                "rating": 5,
                "createdAt": "2024-05-01T12:00:00Z",
                "status": "approved"
            }],
            "stats": { "productId": "P1", "averageRating": 5.0, "reviewCount": 1 }
        }"#;

        let dto: ReviewResponseDto = serde_json::from_str(json).unwrap();
        let reviews = dto.reviews.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].customer_name.as_deref(), Some("Alice Brown"));
        assert_eq!(
            reviews[0].created_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(dto.stats.unwrap().review_count, 1);
    }

    #[test]
    fn test_nullable_fields() {
        let json = r#"{
            "reviews": [{ "id": null, "rating": 3, "createdAt": "2024-05-01T12:00:00Z", "status": null }],
            "stats": null
        }"#;

        let dto: ReviewResponseDto = serde_json::from_str(json).unwrap();
        let review = &dto.reviews.unwrap()[0];
        assert!(review.id.is_none());
        assert!(review.title.is_none());
        assert!(review.status.is_none());
        assert!(dto.stats.is_none());
    }

    #[test]
    fn test_missing_sections_default_to_none() {
        let dto: ReviewResponseDto = serde_json::from_str("{}").unwrap();
        assert_eq!(dto, ReviewResponseDto::default());
    }

    #[test]
    fn test_rating_is_required() {
        let json = r#"{ "reviews": [{ "createdAt": "2024-05-01T12:00:00Z" }] }"#;
        assert!(serde_json::from_str::<ReviewResponseDto>(json).is_err());
    }

    #[test]
    fn test_timestamp_without_offset_is_utc() {
        assert_eq!(
            parse_timestamp("2024-05-01T12:30:00.250"),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
                + chrono::Duration::milliseconds(250))
        );
        assert_eq!(
            parse_timestamp("2024-05-01T14:00:00+02:00"),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
