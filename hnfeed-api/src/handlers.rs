//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::debug;

use hnfeed_core::types::{normalize_search_term, Page, PageRequest, Story};

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /api/stories
pub async fn list_stories(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StoriesQuery>,
) -> Result<Json<Page<Story>>> {
    let request = PageRequest::clamped(params.page_number, params.page_size);
    let search = normalize_search_term(params.search_term.as_deref());

    let items = state.feed.list_newest(request, search).await?;
    let total_count = state.feed.count_newest(search).await?;

    debug!(
        page_number = request.page_number,
        page_size = request.page_size,
        returned = items.len(),
        total_count,
        "Served stories page"
    );

    Ok(Json(Page::new(items, request, total_count)))
}

/// GET /health
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Json<HealthResponse> {
    let uptime = state.started_at.elapsed().as_secs();

    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: uptime,
        cache_entries: state.cache.as_ref().map(|c| c.stats().valid_entries),
        upstream: state.config.api_base_url.clone(),
    })
}
