pub mod enrichment;
pub mod gemini;
pub mod google_books;
pub mod normalizer;
pub mod prompt;
pub mod purchase_link;
pub mod recommendation;

use crate::{
    config::Config,
    error::{ApiError, Result},
};
use reqwest::Client;

// Re-export public types
pub use enrichment::EnrichmentService;
pub use gemini::GeminiClient;
pub use google_books::GoogleBooksClient;
pub use purchase_link::PurchaseLinkBuilder;
pub use recommendation::RecommendationService;

/// Outbound HTTP client shared by the model and volume search clients.
/// A construction failure is a startup problem, not an upstream one.
pub(crate) fn http_client(config: &Config) -> Result<Client> {
    Client::builder()
        .timeout(config.http_timeout())
        .build()
        .map_err(|e| ApiError::InternalError(format!("Failed to create HTTP client: {}", e)))
}
