use crate::{config::Config, error::Result, models::BookMetadata, services::http_client};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
struct VolumeInfo {
    #[serde(rename = "imageLinks")]
    image_links: Option<ImageLinks>,
    #[serde(rename = "industryIdentifiers", default)]
    industry_identifiers: Vec<IndustryIdentifier>,
    #[serde(rename = "previewLink")]
    preview_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
    #[serde(rename = "smallThumbnail")]
    small_thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IndustryIdentifier {
    identifier: Option<String>,
}

/// The service sometimes sends `""` where a value is missing
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<VolumeInfo> for BookMetadata {
    fn from(info: VolumeInfo) -> Self {
        let cover_url = info
            .image_links
            .and_then(|links| non_empty(links.thumbnail).or(non_empty(links.small_thumbnail)))
            .map(|url| upgrade_cover_url(&url));

        let identifier = info
            .industry_identifiers
            .into_iter()
            .find_map(|id| non_empty(id.identifier));

        BookMetadata {
            cover_url,
            identifier,
            preview_url: non_empty(info.preview_link),
        }
    }
}

/// Serve covers over https and ask for the larger zoom level
fn upgrade_cover_url(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return raw.replacen("http://", "https://", 1);
    };

    if url.scheme() == "http" {
        let _ = url.set_scheme("https");
    }

    if url.query_pairs().any(|(key, value)| key == "zoom" && value == "1") {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| {
                let value = if key == "zoom" && value == "1" {
                    "2".to_string()
                } else {
                    value.into_owned()
                };
                (key.into_owned(), value)
            })
            .collect();

        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    url.to_string()
}

/// Client for the public volume search service.
///
/// Lookups never fail: any transport error, bad status, undecodable body or
/// empty result resolves to an empty [`BookMetadata`].
#[derive(Debug, Clone)]
pub struct GoogleBooksClient {
    client: Client,
    base_url: String,
}

impl GoogleBooksClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: http_client(config)?,
            base_url: config.google_books_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn lookup(&self, title: &str, author: &str) -> BookMetadata {
        match self.search(title, author).await {
            Ok(Some(info)) => info.into(),
            Ok(None) => {
                debug!("No volume found for '{}' by {}", title, author);
                BookMetadata::default()
            }
            Err(e) => {
                warn!("Volume lookup failed for '{}' by {}: {}", title, author, e);
                BookMetadata::default()
            }
        }
    }

    async fn search(&self, title: &str, author: &str) -> Result<Option<VolumeInfo>> {
        let url = format!("{}/volumes", self.base_url);
        let query = format!("{} {}", title, author);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query.as_str()), ("maxResults", "1")])
            .send()
            .await?
            .error_for_status()?;

        let body: VolumesResponse = response.json().await?;

        Ok(body
            .items
            .and_then(|items| items.into_iter().next())
            .map(|volume| volume.volume_info))
    }
}
