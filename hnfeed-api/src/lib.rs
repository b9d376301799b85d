//! # hnfeed API Server
//!
//! REST API exposing the newest Hacker News stories, paginated and searchable.
//!
//! ## Endpoints
//!
//! - `GET /api/stories?pageNumber=&pageSize=&searchTerm=` - One page of newest stories
//! - `GET /health` - Liveness and cache statistics
//!
//! ## Example
//!
//! ```rust,ignore
//! use hnfeed_api::{ApiServer, ApiConfig};
//!
//! let server = ApiServer::new(ApiConfig::from_env())?;
//! server.run(([0, 0, 0, 0], 5000)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod routes;
mod handlers;
mod state;
mod dto;
mod error;

pub use routes::create_router;
pub use state::{AppState, ApiConfig};
pub use error::ApiError;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use hnfeed_core::error::Result;
use hnfeed_core::traits::StoryFeed;

/// API server for hnfeed.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a server backed by the live Hacker News API.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self {
            state: Arc::new(AppState::new(config)?),
        })
    }

    /// Creates a server backed by an arbitrary feed.
    pub fn with_feed(config: ApiConfig, feed: Arc<dyn StoryFeed>) -> Self {
        Self {
            state: Arc::new(AppState::with_feed(config, feed)),
        }
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("hnfeed API server listening on {}", addr);

        axum::serve(listener, self.router()).await
    }
}
