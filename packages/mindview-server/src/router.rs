use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::Json,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    delete_record, get_live_window, get_record_info, get_trend, health_check, ingest_record,
    load_demo_record, server_info,
};
use crate::state::ServerState;

/// Assemble the full application router. Shared by the binary and the
/// API tests.
pub fn create_router(state: Arc<ServerState>) -> Router {
    let cors = cors_layer(&state);
    let max_upload_size = state.config.max_upload_size;

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/info", get(server_info))
        .route("/api/records/{kind}", post(ingest_record))
        .route("/api/records/{kind}", get(get_record_info))
        .route("/api/records/{kind}", delete(delete_record))
        .route("/api/records/{kind}/demo", post(load_demo_record))
        .route("/api/live/{kind}", get(get_live_window))
        .route("/api/trend/{kind}", get(get_trend))
        .fallback(handle_404)
        .layer(RequestBodyLimitLayer::new(max_upload_size))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(state: &ServerState) -> CorsLayer {
    // "*" means a local viewer without a fixed origin; otherwise pin the
    // configured origins.
    if state.config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse::<HeaderValue>().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
    }
}

async fn handle_404() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Endpoint not found",
            "code": "NOT_FOUND"
        })),
    )
}
