use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use axum::http::StatusCode;

/// Handler for `GET /healthz`: the process is up.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Run a readiness probe under a deadline.
///
/// Returns `200` when the probe succeeds in time and `503` when it fails or
/// does not finish before `timeout`. Services wrap this in their own
/// `GET /readyz` handler with whatever dependency check they need.
pub async fn readiness<F, E>(timeout: Duration, probe: F) -> StatusCode
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, probe).await {
        Ok(Ok(())) => StatusCode::OK,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
        Err(_) => {
            tracing::warn!(
                timeout_ms = timeout.as_millis() as u64,
                "readiness probe timed out"
            );
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
