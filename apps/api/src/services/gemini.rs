use crate::{
    config::Config,
    error::{ApiError, Result},
    services::http_client,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts joined
    fn into_text(self) -> Result<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ApiError::UpstreamError(format!(
                "prompt was blocked by the model: {}",
                reason
            )));
        }

        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ApiError::UpstreamError(
                "model returned no text".to_string(),
            ));
        }

        Ok(text)
    }
}

/// Client for the Gemini `generateContent` endpoint
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model_url: String,
}

impl GeminiClient {
    pub fn new(config: &Config, api_key: &str) -> Result<Self> {
        let client = http_client(config)?;

        let model_url = format!(
            "{}/v1beta/models/{}:generateContent",
            config.gemini_base_url.trim_end_matches('/'),
            config.gemini_model
        );

        info!("Using generative model: {}", config.gemini_model);

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model_url,
        })
    }

    /// Send a single prompt and return the raw text the model produced
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!("Calling generative model at {}", self.model_url);

        let response = self
            .client
            .post(&self.model_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            // The request URL carries the key
            .map_err(|e| ApiError::UpstreamError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::UpstreamError(format!(
                "model request failed with status {}: {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            ApiError::UpstreamError(format!(
                "Failed to decode model response: {}",
                e.without_url()
            ))
        })?;

        body.into_text()
    }
}
