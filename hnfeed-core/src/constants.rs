//! Service constants for hnfeed.
//!
//! Upstream location, cache key layout, freshness window, and paging limits.

// ═══════════════════════════════════════════════════════════════════════════════
// UPSTREAM
// ═══════════════════════════════════════════════════════════════════════════════

/// Base URL of the public Hacker News Firebase API.
pub const DEFAULT_API_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0/";

/// Path (relative to the base URL) of the newest-story ID list.
pub const NEWEST_STORIES_PATH: &str = "newstories.json";

/// Request timeout for upstream calls in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// User agent sent with upstream requests.
pub const DEFAULT_USER_AGENT: &str = concat!("hnfeed/", env!("CARGO_PKG_VERSION"));

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// Cache key for the newest-story ID list.
pub const NEWEST_STORIES_CACHE_KEY: &str = "newest_stories";

/// Prefix of per-item cache keys (`story_details_{id}`).
pub const STORY_DETAILS_CACHE_PREFIX: &str = "story_details_";

/// Time-to-live for every cache entry (5 minutes).
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

// ═══════════════════════════════════════════════════════════════════════════════
// PAGINATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Page number used when none (or one below 1) is requested.
pub const DEFAULT_PAGE_NUMBER: usize = 1;

/// Page size used when none (or one below 1) is requested.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: usize = 50;

/// Returns the cache key for a single story.
pub fn story_cache_key(id: u64) -> String {
    format!("{STORY_DETAILS_CACHE_PREFIX}{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_cache_key() {
        assert_eq!(story_cache_key(8863), "story_details_8863");
    }

    #[test]
    fn test_page_limits_are_consistent() {
        assert!(DEFAULT_PAGE_SIZE <= MAX_PAGE_SIZE);
        assert!(DEFAULT_PAGE_NUMBER >= 1);
    }
}
