use crate::{
    config::Config,
    error::{ApiError, Result},
    models::EnrichedRecommendation,
    services::{
        normalizer, prompt::build_prompt, EnrichmentService, GeminiClient, GoogleBooksClient,
        PurchaseLinkBuilder,
    },
};
use tracing::{debug, info};

/// Full pipeline: prompt the model, normalize its answer, enrich each pick
#[derive(Debug, Clone)]
pub struct RecommendationService {
    gemini: Option<GeminiClient>,
    enrichment: EnrichmentService,
    recommendation_count: usize,
}

impl RecommendationService {
    pub fn new(
        gemini: Option<GeminiClient>,
        enrichment: EnrichmentService,
        recommendation_count: usize,
    ) -> Self {
        Self {
            gemini,
            enrichment,
            recommendation_count,
        }
    }

    /// Wire up all clients from configuration. A missing model credential is
    /// not fatal here; requests report it instead.
    pub fn from_config(config: &Config) -> Result<Self> {
        let gemini = config
            .gemini_api_key()
            .map(|key| GeminiClient::new(config, key))
            .transpose()?;

        let enrichment = EnrichmentService::new(
            GoogleBooksClient::new(config)?,
            PurchaseLinkBuilder::new(&config.purchase_search_url)?,
        );

        Ok(Self::new(gemini, enrichment, config.recommendation_count))
    }

    pub fn api_key_configured(&self) -> bool {
        self.gemini.is_some()
    }

    pub async fn recommend(&self, preferences: &str) -> Result<Vec<EnrichedRecommendation>> {
        let gemini = self.gemini.as_ref().ok_or_else(|| {
            ApiError::ConfigurationError(
                "Gemini API key not configured. Set GEMINI_API_KEY in the environment."
                    .to_string(),
            )
        })?;

        let prompt = build_prompt(preferences, self.recommendation_count);

        info!("Requesting recommendations from generative model");
        let raw = gemini.generate(&prompt).await?;
        debug!("Model raw response: {}", raw);

        let drafts = normalizer::normalize(&raw)?;
        info!("Model returned {} recommendations", drafts.len());

        Ok(self.enrichment.enrich(drafts).await)
    }
}
