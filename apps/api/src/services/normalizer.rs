//! Turns raw generative-model text into an ordered list of recommendation drafts.
//!
//! The model is asked for JSON but frequently wraps it in a markdown code fence,
//! and it does not always honour the requested top-level shape. Accepted shapes
//! are tried in a fixed priority order and the first one present wins.

use crate::{error::ApiError, models::RecommendationDraft};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_+-]*").unwrap());

const CLOSING_FENCE: &str = "```";

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("model output is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("`{field}` is not a list of recommendations: {source}")]
    MalformedList {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("no recommendation list found, top-level keys: {keys:?}")]
    Schema { keys: Vec<String> },
}

impl From<NormalizeError> for ApiError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::Schema { keys } => ApiError::SchemaError(format!("{:?}", keys)),
            other => ApiError::ParseError(other.to_string()),
        }
    }
}

/// Top-level shapes the model output may take, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseShape {
    /// `{"recommendations": [...]}`
    RecommendationsField,
    /// `[...]`
    RootList,
    /// `{"books": [...]}`
    BooksField,
}

const SHAPE_PRIORITY: [ResponseShape; 3] = [
    ResponseShape::RecommendationsField,
    ResponseShape::RootList,
    ResponseShape::BooksField,
];

impl ResponseShape {
    /// The candidate list for this shape. A present key is authoritative even
    /// when its value turns out not to be a list.
    fn select<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        match self {
            ResponseShape::RecommendationsField => root.get("recommendations"),
            ResponseShape::RootList => root.is_array().then_some(root),
            ResponseShape::BooksField => root.get("books"),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ResponseShape::RecommendationsField => "recommendations",
            ResponseShape::RootList => "<root>",
            ResponseShape::BooksField => "books",
        }
    }
}

/// Remove a surrounding markdown code fence (with optional language tag) and
/// surrounding whitespace. Text without a fence is only trimmed.
pub fn strip_code_fences(raw: &str) -> &str {
    let text = raw.trim();
    let text = match OPENING_FENCE.find(text) {
        Some(fence) => text[fence.end()..].trim(),
        None => text,
    };

    text.strip_suffix(CLOSING_FENCE).unwrap_or(text).trim()
}

/// Parse model output into drafts, preserving the model's order and count
pub fn normalize(raw: &str) -> Result<Vec<RecommendationDraft>, NormalizeError> {
    let cleaned = strip_code_fences(raw);
    let root: Value = serde_json::from_str(cleaned).map_err(NormalizeError::Parse)?;

    for shape in SHAPE_PRIORITY {
        if let Some(list) = shape.select(&root) {
            return Vec::<RecommendationDraft>::deserialize(list).map_err(|source| {
                NormalizeError::MalformedList {
                    field: shape.label(),
                    source,
                }
            });
        }
    }

    Err(NormalizeError::Schema {
        keys: top_level_keys(&root),
    })
}

fn top_level_keys(root: &Value) -> Vec<String> {
    root.as_object()
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: &str = r#"[
        {"title": "The Name of the Rose", "author": "Umberto Eco", "reason": "A monastery murder mystery."},
        {"title": "Gaudy Night", "author": "Dorothy L. Sayers", "reason": "Academic intrigue."},
        {"title": "The Daughter of Time", "author": "Josephine Tey", "reason": "A historical cold case."}
    ]"#;

    #[test]
    fn test_strip_plain_text_is_trimmed() {
        assert_eq!(strip_code_fences("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_json_fence() {
        let raw = "```json\n{\"books\": []}\n```";
        assert_eq!(strip_code_fences(raw), "{\"books\": []}");
    }

    #[test]
    fn test_strip_bare_fence() {
        let raw = "\n```\n[1, 2]\n```  \n";
        assert_eq!(strip_code_fences(raw), "[1, 2]");
    }

    #[test]
    fn test_strip_fence_without_newline() {
        assert_eq!(strip_code_fences("```json{\"books\": []}```"), "{\"books\": []}");
    }

    #[test]
    fn test_fenced_and_unfenced_normalize_equally() {
        let plain = format!("{{\"recommendations\": {}}}", ITEMS);
        let fenced = format!("```json\n{}\n```", plain);

        let from_plain = normalize(&plain).unwrap();
        let from_fenced = normalize(&fenced).unwrap();

        assert_eq!(from_plain, from_fenced);
        assert_eq!(from_plain.len(), 3);
    }

    #[test]
    fn test_all_shapes_are_equivalent() {
        let wrapped = normalize(&format!("{{\"recommendations\": {}}}", ITEMS)).unwrap();
        let bare = normalize(ITEMS).unwrap();
        let books = normalize(&format!("{{\"books\": {}}}", ITEMS)).unwrap();

        assert_eq!(wrapped, bare);
        assert_eq!(bare, books);
    }

    #[test]
    fn test_order_is_preserved() {
        let drafts = normalize(ITEMS).unwrap();
        let titles: Vec<&str> = drafts.iter().map(|d| d.title.as_str()).collect();

        assert_eq!(
            titles,
            vec!["The Name of the Rose", "Gaudy Night", "The Daughter of Time"]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let raw = r#"[
            {"title": "Dune", "author": "Frank Herbert", "reason": "a"},
            {"title": "Dune", "author": "Frank Herbert", "reason": "a"}
        ]"#;
        assert_eq!(normalize(raw).unwrap().len(), 2);
    }

    #[test]
    fn test_recommendations_key_takes_priority_over_books() {
        let raw = r#"{
            "books": [{"title": "Loser", "author": "Nobody", "reason": ""}],
            "recommendations": [{"title": "Winner", "author": "Somebody", "reason": ""}]
        }"#;

        let drafts = normalize(raw).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "Winner");
    }

    #[test]
    fn test_empty_list_is_valid() {
        assert!(normalize("{\"recommendations\": []}").unwrap().is_empty());
        assert!(normalize("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_text_is_parse_error() {
        for raw in ["", "```json\n```", "{\"recommendations\": [", "Sure! Here are some books"] {
            assert!(
                matches!(normalize(raw), Err(NormalizeError::Parse(_))),
                "expected parse error for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_unknown_object_is_schema_error_with_keys() {
        match normalize(r#"{"items": [], "note": "hi"}"#) {
            Err(NormalizeError::Schema { keys }) => {
                assert_eq!(keys, vec!["items".to_string(), "note".to_string()]);
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_root_is_schema_error_without_keys() {
        match normalize("\"just a string\"") {
            Err(NormalizeError::Schema { keys }) => assert!(keys.is_empty()),
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_matched_key_with_wrong_shape_fails_fast() {
        let raw = r#"{
            "recommendations": "none today",
            "books": [{"title": "Dune", "author": "Frank Herbert", "reason": ""}]
        }"#;

        match normalize(raw) {
            Err(NormalizeError::MalformedList { field, .. }) => {
                assert_eq!(field, "recommendations")
            }
            other => panic!("expected malformed list, got {:?}", other),
        }
    }

    #[test]
    fn test_schema_error_message_lists_keys() {
        let err: ApiError = normalize(r#"{"items": []}"#).unwrap_err().into();
        assert_eq!(err.to_string(), "Unexpected response structure: [\"items\"]");
    }
}
