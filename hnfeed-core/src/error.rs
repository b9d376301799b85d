//! Error types for hnfeed.
//!
//! Failures are either fatal to a request (the ID list cannot be obtained) or
//! tolerated per item. Both are described by [`FeedError`]; the service decides
//! which ones to swallow.

use thiserror::Error;

/// Result type alias using `FeedError`.
pub type Result<T> = std::result::Result<T, FeedError>;

/// Main error type for all hnfeed operations.
#[derive(Debug, Error)]
pub enum FeedError {
    // ═══════════════════════════════════════════════════════════════════════════
    // UPSTREAM ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned HTTP {status} for {url}")]
    UpstreamStatus { url: String, status: u16 },

    /// Upstream body could not be interpreted.
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FeedError {
    /// Returns true if the failure happened talking to the upstream API.
    pub fn is_upstream_error(&self) -> bool {
        matches!(
            self,
            FeedError::Http(_) | FeedError::UpstreamStatus { .. } | FeedError::InvalidResponse(_)
        )
    }
}
