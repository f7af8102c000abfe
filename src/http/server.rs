//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the resolve and health handlers
//! - Wire up middleware (tracing, request timeout, request ID)
//! - Bind server to listener with graceful shutdown
//! - Translate resolver outcomes into JSON responses

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ResolverConfig;
use crate::content::ResolveContext;
use crate::http::request::{request_id, ResolveBody, ResolveQuery};
use crate::http::response::{ApiError, ResolveResponse};
use crate::lifecycle::shutdown;
use crate::resolver::UrlResolver;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<UrlResolver>,
}

/// Public HTTP server for content resolution.
pub struct HttpServer {
    router: Router,
    config: ResolverConfig,
}

impl HttpServer {
    pub fn new(config: ResolverConfig, resolver: Arc<UrlResolver>) -> Self {
        let router = build_router(&config, AppState { resolver });
        Self { router, config }
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &ResolverConfig, state: AppState) -> Router {
    Router::new()
        .route("/api/content/resolve", get(resolve_get).post(resolve_post))
        .route("/health", get(health))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

async fn resolve_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let (slug, context) = query.into_parts(&headers)?;
    resolve(&state, slug, context, request_id(&headers)).await
}

async fn resolve_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ResolveBody>, JsonRejection>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    let (slug, context) = body.into_parts(&headers)?;
    resolve(&state, slug, context, request_id(&headers)).await
}

/// Runs the resolution as its own task so a panicking adapter surfaces as a
/// 500 instead of tearing down the connection.
async fn resolve(
    state: &AppState,
    slug: String,
    context: ResolveContext,
    request_id: String,
) -> Result<Json<ResolveResponse>, ApiError> {
    tracing::debug!(request_id = %request_id, slug = %slug, "Resolving content");

    let resolver = state.resolver.clone();
    let task_slug = slug.clone();
    let resolved = tokio::spawn(async move { resolver.resolve(&task_slug, context).await })
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    match resolved {
        Some(envelope) => Ok(Json(ResolveResponse::new(envelope))),
        None => {
            tracing::debug!(request_id = %request_id, slug = %slug, "Content not found");
            Err(ApiError::NotFound)
        }
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}
