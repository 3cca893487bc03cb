// Copyright 2026 bcv-rates Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP REST facade over the rate extraction service.
//!
//! Thin I/O shell: every endpoint fetches and/or serializes, the actual
//! extraction semantics live in [`crate::extraction`]. Errors surface as a
//! JSON envelope with a machine `error` code and a human `message`, never a
//! stack trace.

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::error::RateError;
use crate::extraction;
use crate::fetch::PageFetcher;
use crate::types::RateRecord;

/// Shared, immutable per-process state. Each request constructs and
/// discards its own document and record; nothing here is mutated.
pub struct AppState {
    pub fetcher: PageFetcher,
    pub source_url: String,
}

/// Build the axum Router with all endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(index))
        .route("/api/rates", get(rates))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

/// Bind the given port and serve until shutdown.
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("rate API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

// ── Handlers ────────────────────────────────────────────────────────────────

async fn rates(State(state): State<Arc<AppState>>) -> Response {
    match fetch_and_extract(&state).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, code = e.code(), "rate request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": e.code(),
                    "message": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// Fetch the source page and run extraction on the blocking pool.
///
/// `scraper`'s types are `!Send`, so the synchronous extraction must not
/// run inside the handler future itself.
async fn fetch_and_extract(state: &AppState) -> Result<RateRecord, RateError> {
    let html = state.fetcher.fetch(&state.source_url).await?;
    let source = state.source_url.clone();

    tokio::task::spawn_blocking(move || extraction::extract_rates(&html, &source))
        .await
        .map_err(|e| RateError::Parse(format!("extraction task failed: {e}")))?
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now(),
    }))
}

/// API description document served at the root.
async fn index(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "name": "bcv-rates",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "USD/EUR exchange rates published by the Banco Central de Venezuela",
        "source": state.source_url,
        "endpoints": {
            "GET /api/rates": "current official rates",
            "GET /health": "service health",
        },
    }))
}

async fn not_found(uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "not_found",
            "path": uri.path(),
        })),
    )
}
