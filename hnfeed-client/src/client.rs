//! Hacker News API client implementation.
//!
//! Two endpoints are used: `newstories.json` for the ID list and
//! `item/{id}.json` for item details. No retries; a failed call fails once.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use hnfeed_core::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_USER_AGENT, NEWEST_STORIES_PATH,
};
use hnfeed_core::error::{FeedError, Result};
use hnfeed_core::traits::ItemSource;
use hnfeed_core::types::Story;

/// Client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL (e.g., "https://hacker-news.firebaseio.com/v0/")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.into(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

impl ClientConfig {
    /// Creates a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// HTTP client for the Hacker News API.
pub struct HackerNewsClient {
    base_url: Url,
    http_client: reqwest::Client,
}

impl HackerNewsClient {
    /// Creates a client for the public API with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FeedError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// Returns the normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| FeedError::Config(format!("invalid endpoint '{}': {}", path, e)))
    }

    /// GETs `url` and returns the body, failing on non-success status.
    async fn get_text(&self, url: Url) -> Result<String> {
        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FeedError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FeedError::Http(e.to_string()))
    }
}

#[async_trait]
impl ItemSource for HackerNewsClient {
    #[instrument(skip(self))]
    async fn fetch_new_story_ids(&self) -> Result<Vec<u64>> {
        let url = self.endpoint(NEWEST_STORIES_PATH)?;
        let body = self.get_text(url).await?;

        let ids: Vec<u64> = serde_json::from_str(&body).map_err(|e| {
            FeedError::InvalidResponse(format!("newest story IDs: {}", e))
        })?;

        debug!(count = ids.len(), "Fetched newest story IDs");
        Ok(ids)
    }

    #[instrument(skip(self))]
    async fn fetch_item(&self, id: u64) -> Result<Option<Story>> {
        let url = self.endpoint(&format!("item/{}.json", id))?;
        let body = self.get_text(url).await?;

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| FeedError::InvalidResponse(format!("item {}: {}", id, e)))?;

        let story = Story::from_json_value(value)?;
        if story.is_none() {
            debug!(id, "Upstream has no item");
        }
        Ok(story)
    }
}

/// Parses the base URL, adding the trailing slash `Url::join` needs to keep
/// the last path segment.
fn parse_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };

    let url = Url::parse(&with_slash)
        .map_err(|e| FeedError::Config(format!("invalid base URL '{}': {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FeedError::Config(format!(
            "unsupported base URL scheme '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> HackerNewsClient {
        HackerNewsClient::with_config(ClientConfig::new(format!("{}/v0", server.uri()))).unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = HackerNewsClient::with_config(ClientConfig::new("http://localhost:9/v0")).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:9/v0/");
        assert_eq!(
            client.endpoint("item/5.json").unwrap().as_str(),
            "http://localhost:9/v0/item/5.json"
        );
    }

    #[test]
    fn test_default_base_url() {
        let client = HackerNewsClient::new().unwrap();
        assert_eq!(
            client.endpoint(NEWEST_STORIES_PATH).unwrap().as_str(),
            "https://hacker-news.firebaseio.com/v0/newstories.json"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HackerNewsClient::with_config(ClientConfig::new("not a url")),
            Err(FeedError::Config(_))
        ));
        assert!(matches!(
            HackerNewsClient::with_config(ClientConfig::new("ftp://example.com/v0")),
            Err(FeedError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_new_story_ids() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/newstories.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([39001, 39000, 38999])))
            .expect(1)
            .mount(&server)
            .await;

        let ids = client_for(&server).await.fetch_new_story_ids().await.unwrap();
        assert_eq!(ids, vec![39001, 39000, 38999]);
    }

    #[tokio::test]
    async fn test_fetch_new_story_ids_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/newstories.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"oops\": true}"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch_new_story_ids().await.unwrap_err();
        assert!(matches!(err, FeedError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_fetch_new_story_ids_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/newstories.json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch_new_story_ids().await.unwrap_err();
        assert!(matches!(err, FeedError::UpstreamStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_fetch_item() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/item/8863.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "by": "dhouston",
                "descendants": 71,
                "id": 8863,
                "score": 104,
                "time": 1175714200,
                "title": "My YC app: Dropbox - Throw away your USB drive",
                "type": "story",
                "url": "http://www.getdropbox.com/u/2/screencast.html"
            })))
            .mount(&server)
            .await;

        let story = client_for(&server).await.fetch_item(8863).await.unwrap().unwrap();
        assert_eq!(story.id, 8863);
        assert_eq!(story.by.as_deref(), Some("dhouston"));
        assert_eq!(story.score, 104);
    }

    #[tokio::test]
    async fn test_fetch_item_null() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/item/1.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let story = client_for(&server).await.fetch_item(1).await.unwrap();
        assert!(story.is_none());
    }

    #[tokio::test]
    async fn test_fetch_item_garbage() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/item/2.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch_item(2).await.unwrap_err();
        assert!(matches!(err, FeedError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_fetch_item_not_found_status() {
        let server = MockServer::start().await;

        let err = client_for(&server).await.fetch_item(3).await.unwrap_err();
        assert!(matches!(err, FeedError::UpstreamStatus { status: 404, .. }));
    }
}
