mod health;
mod live;
mod records;
mod trend;

pub use health::*;
pub use live::*;
pub use records::*;
pub use trend::*;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use mind_rs::{RecordError, RecordKind};

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn error_response(status: StatusCode, code: &str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.to_string(),
        }),
    )
}

/// Map engine errors onto the HTTP surface. All three are caller-facing
/// precondition failures, not server faults.
pub(crate) fn record_error(err: RecordError) -> ApiError {
    let (status, code) = match &err {
        RecordError::MalformedRecord(_) => (StatusCode::BAD_REQUEST, "MALFORMED_RECORD"),
        RecordError::EmptyRecord => (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_RECORD"),
        RecordError::NoRecordLoaded(_) => (StatusCode::NOT_FOUND, "NO_RECORD_LOADED"),
    };
    error_response(status, code, err.to_string())
}

/// Parse the `{kind}` path segment.
pub(crate) fn parse_kind(raw: &str) -> Result<RecordKind, ApiError> {
    raw.parse::<RecordKind>().map_err(|msg| {
        error_response(StatusCode::NOT_FOUND, "UNKNOWN_RECORD_KIND", msg)
    })
}
