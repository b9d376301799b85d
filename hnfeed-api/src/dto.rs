//! DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

/// Query string for listing stories.
///
/// Values are taken as raw integers so that out-of-range input is clamped
/// rather than rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoriesQuery {
    /// 1-based page number (default 1)
    pub page_number: Option<i64>,
    /// Items per page (default 10, max 50)
    pub page_size: Option<i64>,
    /// Optional case-insensitive filter on title and author
    pub search_term: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status
    pub status: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Live cache entries (absent when the feed has no local cache)
    pub cache_entries: Option<usize>,
    /// Upstream API base URL
    pub upstream: String,
}
