use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use mind_rs::{TrendMethod, TrendSeries};

use crate::state::ServerState;

use super::{error_response, parse_kind, record_error, ApiError};

/// Upper bound on the requested decimation size; a trend response is a
/// fixed-size summary, not a raw data export.
const MAX_TREND_POINTS: usize = 5000;

/// Trend query parameters
#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    /// Comma-separated channel ids; all channels when omitted
    pub channels: Option<String>,
    /// Decimation bound; server default when omitted
    pub points: Option<usize>,
    /// "rms" / "rms_windowed" or "mean" / "mean_resample"
    pub method: Option<String>,
}

/// Trend summaries for one kind, independent of the live cursor.
pub async fn get_trend(
    State(state): State<Arc<ServerState>>,
    Path(kind): Path<String>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<BTreeMap<String, TrendSeries>>, ApiError> {
    let kind = parse_kind(&kind)?;

    if let Some(points) = query.points {
        if points == 0 || points > MAX_TREND_POINTS {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "INVALID_TREND_POINTS",
                format!("points must be between 1 and {}", MAX_TREND_POINTS),
            ));
        }
    }

    let method = match &query.method {
        Some(raw) => Some(raw.parse::<TrendMethod>().map_err(|msg| {
            error_response(StatusCode::BAD_REQUEST, "INVALID_TREND_METHOD", msg)
        })?),
        None => None,
    };

    let channels: Option<Vec<String>> = query.channels.as_ref().map(|raw| {
        raw.split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect()
    });

    let series = state
        .store
        .trend(kind, channels.as_deref(), query.points, method)
        .map_err(record_error)?;

    tracing::debug!(kind = %kind, channels = series.len(), "trend served");
    Ok(Json(series))
}
