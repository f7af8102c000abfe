use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;
use crate::resolver::{AdapterSummary, ResolverStats};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct EnabledUpdate {
    pub enabled: bool,
}

pub async fn get_status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn get_stats(State(state): State<AppState>) -> Json<ResolverStats> {
    Json(state.resolver.stats())
}

pub async fn clear_cache(State(state): State<AppState>) -> StatusCode {
    state.resolver.clear_cache();
    StatusCode::NO_CONTENT
}

pub async fn get_adapter(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<AdapterSummary>, StatusCode> {
    let adapter = state.resolver.adapter(&name).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(AdapterSummary {
        name: adapter.name().to_string(),
        enabled: adapter.is_enabled(),
        priority: adapter.priority(),
    }))
}

pub async fn set_adapter_enabled(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(update): Json<EnabledUpdate>,
) -> StatusCode {
    if state.resolver.set_adapter_enabled(&name, update.enabled) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

pub async fn remove_adapter(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> StatusCode {
    if state.resolver.remove_adapter(&name) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
