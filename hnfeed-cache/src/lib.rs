//! TTL cache for hnfeed.
//!
//! Generic in-memory cache with per-entry expiration and lazy expiry on read.

mod cache;

pub use cache::{CacheConfig, CacheStats, TtlCache};
