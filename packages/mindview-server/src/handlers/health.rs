use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use mind_rs::RecordKind;

use crate::state::ServerState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub records_loaded: BTreeMap<String, bool>,
    pub timestamp: String,
}

/// Server info response
#[derive(Debug, Serialize, Deserialize)]
pub struct ServerInfoResponse {
    pub version: String,
    pub window_length: f64,
    pub scroll_step: f64,
    pub trend_points: usize,
    pub record_kinds: Vec<String>,
}

/// Health check endpoint
pub async fn health_check(
    State(state): State<Arc<ServerState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let records_loaded = RecordKind::ALL
        .iter()
        .map(|kind| (kind.to_string(), state.store.is_loaded(*kind)))
        .collect();

    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        records_loaded,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(response))
}

/// Server info endpoint
pub async fn server_info(State(state): State<Arc<ServerState>>) -> Json<ServerInfoResponse> {
    Json(ServerInfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        window_length: state.config.window_length,
        scroll_step: state.config.scroll_step,
        trend_points: state.config.trend_points,
        record_kinds: RecordKind::ALL.iter().map(|k| k.to_string()).collect(),
    })
}
