// src/server.rs

//! Local proxy route for the upstream feed.
//!
//! The proxy never interprets the payload beyond checking that it is JSON:
//! the body is relayed byte-for-byte with a short-lived cache directive.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::de::IgnoredAny;
use tokio::net::TcpListener;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::services::FeedClient;

/// Route serving the relayed feed.
pub const RESTAURANTS_PATH: &str = "/api/restaurants";

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct ProxyState {
    feed: FeedClient,
    cache_control: HeaderValue,
}

impl ProxyState {
    pub fn new(feed: FeedClient, cache_control: &str) -> Result<Self> {
        let cache_control = HeaderValue::from_str(cache_control)
            .map_err(|e| AppError::config(format!("server.cache_control: {e}")))?;
        Ok(Self {
            feed,
            cache_control,
        })
    }

    /// Build proxy state from application configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(FeedClient::new(&config.upstream)?, &config.server.cache_control)
    }
}

/// Build the proxy router.
pub fn build_router(state: ProxyState) -> Router {
    Router::new()
        .route(RESTAURANTS_PATH, get(restaurants_handler))
        .route("/healthz", get(healthz_handler))
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(state: ProxyState, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("Proxy listening on http://{}{}", listener.local_addr()?, RESTAURANTS_PATH);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn healthz_handler() -> &'static str {
    "ok"
}

async fn restaurants_handler(State(state): State<Arc<ProxyState>>) -> Response {
    let body = match state.feed.fetch_raw().await {
        Ok(body) => body,
        Err(AppError::Fetch { status, .. }) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            return error_response(status, "Failed to fetch restaurant data");
        }
        Err(e) => {
            log::error!("Error fetching restaurants: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    if let Err(e) = serde_json::from_slice::<IgnoredAny>(&body) {
        log::error!("Upstream body from {} is not JSON: {}", state.feed.url(), e);
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
    }

    (
        [
            (CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (CACHE_CONTROL, state.cache_control.clone()),
        ],
        body,
    )
        .into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
