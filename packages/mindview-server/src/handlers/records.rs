use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use mind_rs::{synth, RecordSummary};

use crate::state::ServerState;

use super::{parse_kind, record_error, ApiError};

/// Ingest an upload (CSV or JSON body) and replace the record for a kind.
pub async fn ingest_record(
    State(state): State<Arc<ServerState>>,
    Path(kind): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<RecordSummary>), ApiError> {
    let kind = parse_kind(&kind)?;
    let summary = state.store.ingest(kind, &body).map_err(record_error)?;

    tracing::info!(
        kind = %summary.kind,
        record_id = %summary.id,
        channels = summary.channels.len(),
        duration = summary.duration,
        "record ingested"
    );
    Ok((StatusCode::CREATED, Json(summary)))
}

/// Load the synthetic demo record for a kind.
pub async fn load_demo_record(
    State(state): State<Arc<ServerState>>,
    Path(kind): Path<String>,
) -> Result<(StatusCode, Json<RecordSummary>), ApiError> {
    let kind = parse_kind(&kind)?;
    let record = synth::demo_record(kind).map_err(record_error)?;
    let summary = state.store.install(record);

    tracing::info!(kind = %summary.kind, record_id = %summary.id, "demo record loaded");
    Ok((StatusCode::CREATED, Json(summary)))
}

/// Summary of the currently loaded record for a kind.
pub async fn get_record_info(
    State(state): State<Arc<ServerState>>,
    Path(kind): Path<String>,
) -> Result<Json<RecordSummary>, ApiError> {
    let kind = parse_kind(&kind)?;
    let record = state.store.current(kind).map_err(record_error)?;
    Ok(Json(record.summary()))
}

/// Drop the loaded record for a kind.
pub async fn delete_record(
    State(state): State<Arc<ServerState>>,
    Path(kind): Path<String>,
) -> Result<StatusCode, ApiError> {
    let kind = parse_kind(&kind)?;
    if state.store.clear(kind) {
        tracing::info!(kind = %kind, "record cleared");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(record_error(mind_rs::RecordError::NoRecordLoaded(kind)))
    }
}
