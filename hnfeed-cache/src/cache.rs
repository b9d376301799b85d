//! In-memory TTL cache.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::trace;

use hnfeed_core::constants::DEFAULT_CACHE_TTL_SECONDS;
use hnfeed_core::traits::Cache;

/// Cache entry with an absolute expiration instant.
#[derive(Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Default TTL in seconds
    pub default_ttl_seconds: u64,
    /// Entry count at which `set` sweeps expired entries first
    pub cleanup_threshold: usize,
    /// Whether to sweep expired entries on insert
    pub auto_cleanup: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            cleanup_threshold: 1024,
            auto_cleanup: true,
        }
    }
}

/// In-memory key-value cache with per-entry expiry.
///
/// Thread-safe. Expired entries read as absent; they are physically dropped
/// by [`TtlCache::cleanup_expired`] or by the sweep on insert. There is no
/// size bound and live entries are never evicted.
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    config: CacheConfig,
}

impl<V: Clone> TtlCache<V> {
    /// Creates a new cache with default configuration.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Returns the configured default TTL.
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.config.default_ttl_seconds)
    }

    /// Gets a live value by key.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let entries = self.entries.read();
        entries.get(key).and_then(|e| {
            if e.is_expired(now) {
                None
            } else {
                Some(e.value.clone())
            }
        })
    }

    /// Caches a value with the default TTL.
    pub fn set_default(&self, key: &str, value: V) {
        self.set(key, value, self.default_ttl());
    }

    /// Caches a value that expires `ttl` from now.
    pub fn set(&self, key: &str, value: V, ttl: Duration) {
        let now = Instant::now();
        let mut entries = self.entries.write();

        if self.config.auto_cleanup && entries.len() >= self.config.cleanup_threshold {
            let before = entries.len();
            entries.retain(|_, e| !e.is_expired(now));
            trace!(removed = before - entries.len(), "Swept expired cache entries");
        }

        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: now + ttl,
            },
        );
    }

    /// Removes a cached entry.
    pub fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Removes all expired entries.
    pub fn cleanup_expired(&self) {
        let now = Instant::now();
        self.entries.write().retain(|_, e| !e.is_expired(now));
    }

    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let entries = self.entries.read();
        let expired = entries.values().filter(|e| e.is_expired(now)).count();
        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len().saturating_sub(expired),
        }
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Sync> Cache<V> for TtlCache<V> {
    fn get(&self, key: &str) -> Option<V> {
        TtlCache::get(self, key)
    }

    fn set(&self, key: &str, value: V, ttl: Duration) {
        TtlCache::set(self, key, value, ttl)
    }
}

/// Cache statistics.
#[derive(Clone, Debug, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub valid_entries: usize,
}
