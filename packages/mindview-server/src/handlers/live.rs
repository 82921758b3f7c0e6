use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use mind_rs::WindowResult;

use crate::state::ServerState;

use super::{parse_kind, record_error, ApiError};

/// One live poll: advances the kind's cursor by one step and returns the
/// window starting at the pre-advance offset. Callers poll roughly once
/// per second; the configured scroll step is smaller than that on purpose
/// so consecutive windows overlap and the rendered trace scrolls smoothly.
pub async fn get_live_window(
    State(state): State<Arc<ServerState>>,
    Path(kind): Path<String>,
) -> Result<Json<WindowResult>, ApiError> {
    let kind = parse_kind(&kind)?;
    let window = state.store.live_window(kind).map_err(record_error)?;

    tracing::debug!(
        kind = %kind,
        window_start = window.window_start,
        window_end = window.window_end,
        "live window served"
    );
    Ok(Json(window))
}
