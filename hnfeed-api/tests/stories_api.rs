//! End-to-end tests: router → service → HTTP client → mocked upstream.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hnfeed_api::{ApiConfig, ApiServer};

async fn mock_upstream() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/newstories.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v0/item/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "title": "Rust guide", "by": "ferris", "time": 1700000000,
            "score": 42, "descendants": 7, "url": "https://example.com/rust", "type": "story"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v0/item/2.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v0/item/3.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "title": "Go tips", "by": "gopher", "time": 1700000100,
            "score": 5, "descendants": 0, "type": "story"
        })))
        .expect(1)
        .mount(&server)
        .await;

    server
}

fn server_for(upstream: &MockServer) -> ApiServer {
    let config = ApiConfig {
        api_base_url: format!("{}/v0/", upstream.uri()),
        ..Default::default()
    };
    ApiServer::new(config).unwrap()
}

async fn get_json(server: &ApiServer, uri: &str) -> (StatusCode, Value) {
    let response = server
        .router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_failed_item_is_skipped_but_counted() {
    let upstream = mock_upstream().await;
    let server = server_for(&upstream);

    let (status, body) = get_json(&server, "/api/stories").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<u64> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(body["totalCount"], 3);
    assert_eq!(body["items"][0]["by"], "ferris");
    assert_eq!(body["items"][1]["url"], Value::Null);
}

#[tokio::test]
async fn test_repeat_requests_hit_cache() {
    let upstream = mock_upstream().await;
    let server = server_for(&upstream);

    get_json(&server, "/api/stories").await;
    let (_, body) = get_json(&server, "/api/stories?searchTerm=GO").await;

    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["items"][0]["title"], "Go tips");

    let (_, health) = get_json(&server, "/health").await;
    assert_eq!(health["cache_entries"], 3);
    // `expect(1)` on the ID list and good items is verified when `upstream` drops
}

#[tokio::test]
async fn test_upstream_id_list_failure_is_500() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/newstories.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&upstream)
        .await;
    let server = server_for(&upstream);

    let (status, body) = get_json(&server, "/api/stories").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
}
