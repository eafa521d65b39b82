// Copyright 2026 Schemescout Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP surface for the scheme-search service.
//!
//! Two routes: `POST /get-schemes` runs the full query-build + browser-drive
//! pipeline; `GET /health` answers unconditionally and has no dependency on
//! the browser subsystem.

use crate::error::SchemeError;
use crate::extractor::{SchemeRecord, SchemeScraper};
use crate::query::{self, SearchCriteria};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use uuid::Uuid;

/// Wrapper to assert a future is Send.
///
/// The scrape future contains only Send types but the compiler cannot prove
/// it due to higher-ranked lifetime bounds in transitive dependencies
/// (scraper's `SelectorErrorKind<'_>`, chromiumoxide types). All concrete
/// data crossing the await points is Arc, String, Vec, and serde_json::Value.
struct AssertSend<F>(F);

// SAFETY: the wrapped future holds only Arc<SchemeScraper>, owned Strings,
// and serde_json::Values — all Send. The compiler's refusal comes from
// higher-ranked lifetime bounds in scraper/chromiumoxide, not from actual
// non-Send data.
unsafe impl<F: std::future::Future> Send for AssertSend<F> {}

impl<F: std::future::Future> std::future::Future for AssertSend<F> {
    type Output = F::Output;
    fn poll(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Self::Output> {
        let inner = unsafe { self.map_unchecked_mut(|s| &mut s.0) };
        inner.poll(cx)
    }
}

/// Success body for `POST /get-schemes`.
#[derive(Debug, Serialize)]
pub struct SchemeResponse {
    pub count: usize,
    pub query: String,
    pub results: Vec<SchemeRecord>,
}

/// Build the axum Router with both endpoints.
pub fn router(scraper: Arc<SchemeScraper>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/get-schemes", post(get_schemes))
        .route("/health", get(health))
        .layer(cors)
        .with_state(scraper)
}

/// Start the HTTP server on the given port.
pub async fn start(port: u16, scraper: Arc<SchemeScraper>) -> anyhow::Result<()> {
    let app = router(scraper);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    info!("schemescout listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("received shutdown signal");
        })
        .await?;
    Ok(())
}

// ── Handlers ────────────────────────────────────────────────────

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn get_schemes(
    State(scraper): State<Arc<SchemeScraper>>,
    Json(criteria): Json<SearchCriteria>,
) -> Response {
    let Some(search_text) = query::build_query(&criteria) else {
        return error_response(&SchemeError::MissingCriteria);
    };

    let request_id = Uuid::new_v4();
    info!(%request_id, query = %search_text, "constructed search query");

    // Use AssertSend + spawn to satisfy axum's Send requirement on the
    // handler future; see the type's safety note.
    let outcome = {
        let query = search_text.clone();
        let fut = AssertSend(async move { scraper.search(&query).await });
        tokio::task::spawn(fut).await
    };

    match outcome {
        Ok(Ok(records)) if records.is_empty() => {
            info!(%request_id, "no schemes matched");
            (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "message": "No schemes found matching your criteria",
                    "suggestion": "Try broadening your search parameters",
                })),
            )
                .into_response()
        }
        Ok(Ok(records)) => {
            info!(%request_id, count = records.len(), "search succeeded");
            Json(SchemeResponse {
                count: records.len(),
                query: search_text,
                results: records,
            })
            .into_response()
        }
        Ok(Err(err)) => {
            error!(%request_id, error = %err, "search failed");
            error_response(&err)
        }
        Err(join_err) => {
            error!(%request_id, error = %join_err, "search task panicked");
            error_response(&SchemeError::Automation(anyhow::anyhow!(
                "search task panicked: {join_err}"
            )))
        }
    }
}

fn error_response(err: &SchemeError) -> Response {
    match err {
        SchemeError::MissingCriteria => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Failed to fetch schemes",
                "details": err.to_string(),
                "suggestion": "Please try again with different parameters",
            })),
        )
            .into_response(),
    }
}
