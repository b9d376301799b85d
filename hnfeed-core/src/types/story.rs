//! Story type and the values kept in the shared cache.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FeedError, Result};

/// A single Hacker News item as returned by `item/{id}.json`.
///
/// Never mutated after it has been fetched; cloned out of the cache on every hit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Story {
    /// Upstream item ID
    pub id: u64,
    /// Headline (absent for some deleted items)
    pub title: Option<String>,
    /// Link target (absent for Ask HN and similar text posts)
    pub url: Option<String>,
    /// Creation time, seconds since the Unix epoch
    pub time: i64,
    /// Author handle
    pub by: Option<String>,
    /// Points
    pub score: i64,
    /// Total comment count
    pub descendants: i64,
}

impl Story {
    /// Creates a story with the given ID and title and no other data.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Sets the author handle.
    pub fn with_author(mut self, by: impl Into<String>) -> Self {
        self.by = Some(by.into());
        self
    }

    /// Builds a story from an upstream JSON value, matching field names
    /// case-insensitively.
    ///
    /// Upstream answers `null` for IDs it does not know; that yields `Ok(None)`.
    pub fn from_json_value(value: Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Object(fields) => {
                let normalized: Map<String, Value> = fields
                    .into_iter()
                    .map(|(k, v)| (k.to_ascii_lowercase(), v))
                    .collect();
                let story = serde_json::from_value(Value::Object(normalized))?;
                Ok(Some(story))
            }
            other => Err(FeedError::InvalidResponse(format!(
                "expected item object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Returns true if the title or the author contains `term`, ignoring case.
    ///
    /// A missing field never matches; the other field still can.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        let contains = |field: &Option<String>| {
            field
                .as_deref()
                .map(|s| s.to_lowercase().contains(&needle))
                .unwrap_or(false)
        };
        contains(&self.title) || contains(&self.by)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Value stored in the shared TTL cache.
///
/// The ID list and the per-item details live side by side under string keys,
/// so one cache instance serves the whole pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CachedValue {
    /// The newest-story ID list, in upstream order
    StoryIds(Arc<Vec<u64>>),
    /// Details for a single story
    Story(Story),
}

/// Drops a blank search term. A non-blank term is kept as given, surrounding
/// whitespace included.
pub fn normalize_search_term(term: Option<&str>) -> Option<&str> {
    term.filter(|t| !t.trim().is_empty())
}
