use crate::error::{ApiError, Result};
use reqwest::Url;

/// Category filter restricting the store search to books
const BOOKS_CATEGORY: &str = "stripbooks";

/// Builds store search links for a recommendation.
///
/// An identifier (usually an ISBN) gives a more precise match than free text,
/// so it is preferred whenever the metadata lookup found one.
#[derive(Debug, Clone)]
pub struct PurchaseLinkBuilder {
    search_url: Url,
}

impl PurchaseLinkBuilder {
    pub fn new(search_url: &str) -> Result<Self> {
        let search_url = Url::parse(search_url).map_err(|e| {
            ApiError::ConfigurationError(format!(
                "Invalid purchase search URL '{}': {}",
                search_url, e
            ))
        })?;

        Ok(Self { search_url })
    }

    pub fn build(&self, title: &str, author: &str, identifier: Option<&str>) -> String {
        let keywords = match identifier {
            Some(identifier) => identifier.to_string(),
            None => format!("{} {}", title, author),
        };

        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("k", &keywords)
            .append_pair("i", BOOKS_CATEGORY);

        url.to_string()
    }
}
