use serde::{Deserialize, Serialize};

pub use book::{BookMetadata, EnrichedRecommendation, RecommendationDraft};

mod book;

/// Request structure for book recommendations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Free-text description of what the reader is in the mood for.
    /// Kept optional so a missing field is reported as a validation error.
    #[serde(default)]
    pub preferences: Option<String>,
}

/// Response structure for book recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// Recommendations in the order the model ranked them
    pub recommendations: Vec<EnrichedRecommendation>,
}

/// Health check response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    /// Current timestamp in RFC3339 format
    pub timestamp: String,
    pub version: String,
    pub api_key_configured: bool,
}
