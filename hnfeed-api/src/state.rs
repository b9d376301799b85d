//! App state: feed, cache handle, config.

use std::sync::Arc;
use std::time::{Duration, Instant};

use hnfeed_cache::TtlCache;
use hnfeed_client::{ClientConfig, HackerNewsClient};
use hnfeed_core::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_CACHE_TTL_SECONDS, DEFAULT_HTTP_TIMEOUT_SECONDS,
};
use hnfeed_core::error::Result;
use hnfeed_core::traits::StoryFeed;
use hnfeed_core::types::CachedValue;
use hnfeed_service::{ServiceConfig, StoryService};

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub api_base_url: String,
    pub cache_ttl_seconds: u64,
    pub http_timeout_seconds: u64,
    pub fetch_concurrency: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            http_timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
            fetch_concurrency: 1,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        Self {
            api_base_url: std::env::var("HN_API_BASE_URL")
                .unwrap_or(defaults.api_base_url),
            cache_ttl_seconds: env_parse("CACHE_TTL_SECONDS")
                .unwrap_or(defaults.cache_ttl_seconds),
            http_timeout_seconds: env_parse("HTTP_TIMEOUT_SECONDS")
                .unwrap_or(defaults.http_timeout_seconds),
            fetch_concurrency: env_parse("FETCH_CONCURRENCY")
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.fetch_concurrency),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

pub struct AppState {
    pub config: ApiConfig,
    pub feed: Arc<dyn StoryFeed>,
    pub cache: Option<Arc<TtlCache<CachedValue>>>,
    /// Reported as uptime by `/health`
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = HackerNewsClient::with_config(
            ClientConfig::new(&config.api_base_url).with_timeout(config.http_timeout_seconds),
        )?;

        let cache = Arc::new(TtlCache::<CachedValue>::new());
        let service_config = ServiceConfig::default()
            .with_cache_ttl(Duration::from_secs(config.cache_ttl_seconds))
            .with_fetch_concurrency(config.fetch_concurrency);

        let service = StoryService::with_config(Arc::new(client), cache.clone(), service_config);

        Ok(Self {
            config,
            feed: Arc::new(service),
            cache: Some(cache),
            started_at: Instant::now(),
        })
    }

    pub fn with_feed(config: ApiConfig, feed: Arc<dyn StoryFeed>) -> Self {
        Self {
            config,
            feed,
            cache: None,
            started_at: Instant::now(),
        }
    }
}
