use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::types::{Rejection, ScanOutcome};
use crate::error::CodeServiceError;
use crate::state::AppState;

// ── GET /scan/{id} ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub data: String,
    pub scan_count: u32,
    pub remaining: u32,
}

pub async fn scan_code(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, CodeServiceError> {
    let outcome = state.resolve_code().execute(&id).await?;
    Ok(outcome_response(outcome))
}

/// Map a scan outcome to its HTTP response. Denials share the error body shape.
pub fn outcome_response(outcome: ScanOutcome) -> Response {
    match outcome {
        ScanOutcome::Accepted {
            payload,
            scan_count,
            remaining,
        } => {
            let body = ScanResponse {
                data: payload,
                scan_count,
                remaining,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        ScanOutcome::NotFound => denial(StatusCode::NOT_FOUND, "INVALID_CODE", "invalid code"),
        ScanOutcome::Rejected(Rejection::Inactive { reason }) => {
            let body = serde_json::json!({
                "kind": "CODE_INACTIVE",
                "message": "code is inactive",
                "reason": reason.map(|r| r.as_str()),
            });
            (StatusCode::GONE, Json(body)).into_response()
        }
        ScanOutcome::Rejected(Rejection::Expired) => {
            denial(StatusCode::GONE, "CODE_EXPIRED", "code has expired")
        }
        ScanOutcome::Rejected(Rejection::Exhausted) => {
            denial(StatusCode::GONE, "CODE_EXHAUSTED", "code scan limit exceeded")
        }
    }
}

fn denial(status: StatusCode, kind: &str, message: &str) -> Response {
    let body = serde_json::json!({
        "kind": kind,
        "message": message,
    });
    (status, Json(body)).into_response()
}
