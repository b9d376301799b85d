//! Newest-stories service: cache-or-fetch for the ID list and every item.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use hnfeed_cache::TtlCache;
use hnfeed_core::constants::{story_cache_key, DEFAULT_CACHE_TTL_SECONDS, NEWEST_STORIES_CACHE_KEY};
use hnfeed_core::error::Result;
use hnfeed_core::traits::{Cache, ItemSource, StoryFeed};
use hnfeed_core::types::{normalize_search_term, CachedValue, PageRequest, Story};

/// Service configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Freshness window for the ID list and every item
    pub cache_ttl: Duration,
    /// Item lookups kept in flight at once (1 = one after another)
    pub fetch_concurrency: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECONDS),
            fetch_concurrency: 1,
        }
    }
}

impl ServiceConfig {
    /// Sets the cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Sets how many item lookups may run concurrently.
    pub fn with_fetch_concurrency(mut self, n: usize) -> Self {
        self.fetch_concurrency = n;
        self
    }
}

/// Fetch/aggregate pipeline over an [`ItemSource`] and a [`Cache`].
///
/// Resolves the newest-story ID list, then each story in list order. A story
/// that cannot be resolved is logged and skipped; only a failure to obtain
/// the ID list fails the whole call.
///
/// Concurrent cache misses for the same key each go upstream; the last write
/// wins and both writes carry equivalent data.
pub struct StoryService {
    source: Arc<dyn ItemSource>,
    cache: Arc<dyn Cache<CachedValue>>,
    config: ServiceConfig,
}

impl StoryService {
    /// Creates a service with a fresh in-memory cache and default configuration.
    pub fn new(source: Arc<dyn ItemSource>) -> Self {
        Self::with_config(source, Arc::new(TtlCache::<CachedValue>::new()), ServiceConfig::default())
    }

    /// Creates a service with explicit collaborators.
    pub fn with_config(
        source: Arc<dyn ItemSource>,
        cache: Arc<dyn Cache<CachedValue>>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            source,
            cache,
            config,
        }
    }

    /// Returns the service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the newest-story ID list from cache, or fetches and caches it.
    #[instrument(skip(self))]
    pub async fn get_id_list(&self) -> Result<Arc<Vec<u64>>> {
        if let Some(CachedValue::StoryIds(ids)) = self.cache.get(NEWEST_STORIES_CACHE_KEY) {
            debug!(count = ids.len(), "ID list cache hit");
            return Ok(ids);
        }

        debug!("ID list cache miss, fetching");

        let ids = Arc::new(self.source.fetch_new_story_ids().await?);
        self.cache.set(
            NEWEST_STORIES_CACHE_KEY,
            CachedValue::StoryIds(Arc::clone(&ids)),
            self.config.cache_ttl,
        );

        info!(count = ids.len(), "Refreshed newest story IDs");
        Ok(ids)
    }

    /// Returns a story from cache, or fetches and caches it.
    ///
    /// Any upstream or parse failure is logged and reported as `None`.
    /// Unknown IDs (upstream `null`) are also `None` and are not cached.
    pub async fn get_item_details(&self, id: u64) -> Option<Story> {
        let key = story_cache_key(id);

        if let Some(CachedValue::Story(story)) = self.cache.get(&key) {
            debug!(id, "Story cache hit");
            return Some(story);
        }

        debug!(id, "Story cache miss, fetching");

        match self.source.fetch_item(id).await {
            Ok(Some(story)) => {
                self.cache
                    .set(&key, CachedValue::Story(story.clone()), self.config.cache_ttl);
                Some(story)
            }
            Ok(None) => {
                debug!(id, "No item upstream, skipping");
                None
            }
            Err(e) => {
                warn!(id, error = %e, "Failed to get story details, skipping");
                None
            }
        }
    }

    /// Resolves `ids` in order, drops unresolvable ones, applies the search
    /// filter, and stops after `limit` matches.
    async fn resolve_matching(
        &self,
        ids: &[u64],
        term: Option<&str>,
        limit: Option<usize>,
    ) -> Vec<Story> {
        let resolved = stream::iter(ids.iter().copied())
            .map(|id| self.get_item_details(id))
            .buffered(self.config.fetch_concurrency.max(1))
            .filter_map(move |story| async move {
                story.filter(|s| term.map_or(true, |t| s.matches(t)))
            });

        match limit {
            Some(n) => resolved.take(n).collect::<Vec<_>>().await,
            None => resolved.collect::<Vec<_>>().await,
        }
    }
}

#[async_trait]
impl StoryFeed for StoryService {
    #[instrument(skip(self))]
    async fn list_newest(&self, page: PageRequest, search: Option<&str>) -> Result<Vec<Story>> {
        let ids = self.get_id_list().await?;
        let term = normalize_search_term(search);

        // Stories past the end of the requested page cannot change it.
        let needed = page.offset().saturating_add(page.page_size);
        let stories = self.resolve_matching(&ids, term, Some(needed)).await;

        let items = page.slice(stories);
        debug!(returned = items.len(), "Listed newest stories");
        Ok(items)
    }

    #[instrument(skip(self))]
    async fn count_newest(&self, search: Option<&str>) -> Result<usize> {
        let ids = self.get_id_list().await?;

        match normalize_search_term(search) {
            None => Ok(ids.len()),
            Some(term) => Ok(self.resolve_matching(&ids, Some(term), None).await.len()),
        }
    }
}
