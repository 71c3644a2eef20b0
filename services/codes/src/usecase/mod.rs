pub mod create_code;
pub mod resolve_code;

use std::future::Future;
use std::time::Duration;

use crate::error::CodeServiceError;

/// Await a storage call, giving up after `timeout`.
///
/// A write abandoned at the deadline may still commit, so after
/// `StorageTimeout` its outcome is unknown.
pub(crate) async fn bounded<T, F>(
    timeout: Duration,
    operation: &'static str,
    call: F,
) -> Result<T, CodeServiceError>
where
    F: Future<Output = Result<T, CodeServiceError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                operation,
                timeout_ms = timeout.as_millis() as u64,
                "storage call timed out"
            );
            Err(CodeServiceError::StorageTimeout)
        }
    }
}
