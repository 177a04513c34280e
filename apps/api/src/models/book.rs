use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single recommendation as the generative model produced it.
///
/// Only `title` and `author` are required. Any additional fields the model
/// emits are kept in `extra` and serialized back in their original order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationDraft {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub reason: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecommendationDraft {
    pub fn new(title: &str, author: &str, reason: &str) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            reason: reason.to_string(),
            extra: Map::new(),
        }
    }
}

/// Best-effort details from the volume search service. Every field is optional
/// and an all-empty value is a normal outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookMetadata {
    pub cover_url: Option<String>,
    pub identifier: Option<String>,
    pub preview_url: Option<String>,
}

/// A draft merged with its enrichment fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecommendation {
    #[serde(flatten)]
    pub draft: RecommendationDraft,
    pub cover_url: Option<String>,
    pub purchase_url: String,
    pub preview_url: Option<String>,
}

/// Serialized names of the fields enrichment adds
const ENRICHMENT_FIELDS: [&str; 3] = ["coverUrl", "purchaseUrl", "previewUrl"];

impl EnrichedRecommendation {
    pub fn new(
        mut draft: RecommendationDraft,
        metadata: BookMetadata,
        purchase_url: String,
    ) -> Self {
        // Enrichment wins over anything the model put under the same names
        draft
            .extra
            .retain(|key, _| !ENRICHMENT_FIELDS.contains(&key.as_str()));

        Self {
            draft,
            cover_url: metadata.cover_url,
            purchase_url,
            preview_url: metadata.preview_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_draft_keeps_extra_fields() {
        let draft: RecommendationDraft = serde_json::from_value(json!({
            "title": "The Hound of the Baskervilles",
            "author": "Arthur Conan Doyle",
            "reason": "A classic moor-side mystery.",
            "year": 1902
        }))
        .unwrap();

        assert_eq!(draft.extra.get("year"), Some(&json!(1902)));
    }

    #[test]
    fn test_draft_reason_is_optional() {
        let draft: RecommendationDraft = serde_json::from_value(json!({
            "title": "Rebecca",
            "author": "Daphne du Maurier"
        }))
        .unwrap();

        assert_eq!(draft.reason, "");
    }

    #[test]
    fn test_enriched_serializes_draft_fields_first() {
        let enriched = EnrichedRecommendation::new(
            RecommendationDraft::new("Rebecca", "Daphne du Maurier", "Gothic suspense."),
            BookMetadata::default(),
            "https://www.amazon.com/s?k=Rebecca+Daphne+du+Maurier&i=stripbooks".to_string(),
        );

        let value = serde_json::to_value(&enriched).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();

        assert_eq!(
            keys,
            vec!["title", "author", "reason", "coverUrl", "purchaseUrl", "previewUrl"]
        );
        assert!(value["coverUrl"].is_null());
        assert!(value["previewUrl"].is_null());
    }

    #[test]
    fn test_enrichment_overrides_model_supplied_urls() {
        let mut draft = RecommendationDraft::new("Rebecca", "Daphne du Maurier", "");
        draft
            .extra
            .insert("coverUrl".to_string(), json!("http://made.up/cover.jpg"));

        let enriched = EnrichedRecommendation::new(
            draft,
            BookMetadata::default(),
            "https://www.amazon.com/s?k=Rebecca&i=stripbooks".to_string(),
        );

        assert!(enriched.draft.extra.is_empty());
        assert_eq!(enriched.cover_url, None);
    }
}
