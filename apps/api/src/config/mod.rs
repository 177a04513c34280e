use crate::error::Result;
use config::Environment;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GOOGLE_BOOKS_BASE_URL: &str = "https://www.googleapis.com/books/v1";
pub const DEFAULT_PURCHASE_SEARCH_URL: &str = "https://www.amazon.com/s";
pub const DEFAULT_RECOMMENDATION_COUNT: usize = 3;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Runtime settings, read from the process environment (and `.env`) at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Credential for the generative model. Requests fail with a
    /// configuration error while this is unset or blank.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub google_books_base_url: String,
    pub purchase_search_url: String,
    pub recommendation_count: usize,
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from `.env` and the environment, falling back to defaults
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let settings = config::Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", DEFAULT_PORT as i64)?
            .set_default("gemini_model", DEFAULT_GEMINI_MODEL)?
            .set_default("gemini_base_url", DEFAULT_GEMINI_BASE_URL)?
            .set_default("google_books_base_url", DEFAULT_GOOGLE_BOOKS_BASE_URL)?
            .set_default("purchase_search_url", DEFAULT_PURCHASE_SEARCH_URL)?
            .set_default("recommendation_count", DEFAULT_RECOMMENDATION_COUNT as i64)?
            .set_default("http_timeout_secs", DEFAULT_HTTP_TIMEOUT_SECS as i64)?
            .add_source(Environment::default().try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// The model credential, treating a blank value as absent
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            google_books_base_url: DEFAULT_GOOGLE_BOOKS_BASE_URL.to_string(),
            purchase_search_url: DEFAULT_PURCHASE_SEARCH_URL.to_string(),
            recommendation_count: DEFAULT_RECOMMENDATION_COUNT,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}
