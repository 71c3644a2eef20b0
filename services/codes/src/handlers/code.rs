use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scanpass_core::serde::to_rfc3339_ms;

use crate::error::CodeServiceError;
use crate::state::AppState;
use crate::usecase::create_code::CreateCodeInput;

// ── POST /codes ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCodeRequest {
    pub data: String,
    pub max_scans: i64,
    pub minutes_valid: i64,
}

#[derive(Debug, Serialize)]
pub struct CreateCodeResponse {
    pub id: Uuid,
    pub scan_url: String,
    pub max_scans: u32,
    pub scan_count: u32,
    pub status: &'static str,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
}

pub async fn create_code(
    State(state): State<AppState>,
    body: Result<Json<CreateCodeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateCodeResponse>), CodeServiceError> {
    let Json(body) = body?;
    let record = state
        .create_code()
        .execute(CreateCodeInput {
            payload: body.data,
            max_scans: body.max_scans,
            ttl_minutes: body.minutes_valid,
        })
        .await?;

    let body = CreateCodeResponse {
        id: record.id,
        scan_url: state.scan_url(record.id),
        max_scans: record.max_scans,
        scan_count: record.scan_count,
        status: record.status.as_str(),
        expires_at: record.expires_at,
    };
    Ok((StatusCode::CREATED, Json(body)))
}
