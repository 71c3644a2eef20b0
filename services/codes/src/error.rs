use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Codes service error variants.
///
/// Unknown or refused codes are not errors; they come back as
/// [`crate::domain::types::ScanOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum CodeServiceError {
    #[error("max_scans must be a positive integer")]
    InvalidMaxScans,
    #[error("minutes_valid must be a positive integer")]
    InvalidTtl,
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("storage timed out")]
    StorageTimeout,
    #[error("storage failure")]
    Storage(#[from] anyhow::Error),
}

impl CodeServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidMaxScans => "INVALID_MAX_SCANS",
            Self::InvalidTtl => "INVALID_TTL",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::StorageTimeout => "STORAGE_TIMEOUT",
            Self::Storage(_) => "STORAGE_FAILURE",
        }
    }
}

impl From<JsonRejection> for CodeServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for CodeServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidMaxScans | Self::InvalidTtl | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::StorageTimeout => StatusCode::SERVICE_UNAVAILABLE,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Timeouts are already logged where they happen. Storage failures need the
        // anyhow chain logged so the root cause is traceable.
        if let Self::Storage(ref e) = self {
            tracing::error!(
                error = %format!("{e:#}"),
                kind = "STORAGE_FAILURE",
                "storage failure"
            );
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
