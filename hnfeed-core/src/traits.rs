//! Common traits for hnfeed.
//!
//! These are the seams between the pipeline and its collaborators: the
//! upstream API, the cache, and the feed itself. Each can be replaced with an
//! in-memory fake in tests.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{PageRequest, Story};

// ═══════════════════════════════════════════════════════════════════════════════
// UPSTREAM TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Source of raw items, normally the Hacker News HTTP API.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Fetches the current newest-story ID list, in upstream order.
    async fn fetch_new_story_ids(&self) -> Result<Vec<u64>>;

    /// Fetches a single item.
    ///
    /// Returns `Ok(None)` when upstream has no item with that ID.
    async fn fetch_item(&self, id: u64) -> Result<Option<Story>>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// A time-expiring key-value store.
///
/// A value is visible to `get` immediately after `set` and until `ttl`
/// elapses; after that it behaves as absent. Implementations must tolerate
/// concurrent `get`/`set` from many tasks.
pub trait Cache<V>: Send + Sync {
    /// Returns the live value for `key`, if any.
    fn get(&self, key: &str) -> Option<V>;

    /// Stores `value` under `key`, replacing any previous entry.
    fn set(&self, key: &str, value: V, ttl: Duration);
}

// ═══════════════════════════════════════════════════════════════════════════════
// FEED TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// The newest-stories feed as seen by request handlers.
#[async_trait]
pub trait StoryFeed: Send + Sync {
    /// Returns one page of newest stories, optionally filtered by `search`.
    ///
    /// Does not compute the total; call [`StoryFeed::count_newest`] for that.
    async fn list_newest(&self, page: PageRequest, search: Option<&str>) -> Result<Vec<Story>>;

    /// Returns the number of newest stories, optionally filtered by `search`.
    async fn count_newest(&self, search: Option<&str>) -> Result<usize>;
}
