#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{CodeRecord, ScanState};
use crate::error::CodeServiceError;

/// Durable store for scan codes, keyed by id.
pub trait CodeRepository: Send + Sync {
    /// Persist a freshly created record.
    async fn insert(&self, record: &CodeRecord) -> Result<(), CodeServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CodeRecord>, CodeServiceError>;

    /// Replace the scan state of `id` with `next`, but only if its stored
    /// `scan_count` and `status` still equal those in `expected`.
    ///
    /// Must be atomic with respect to concurrent callers on the same id.
    /// Returns `false` when the stored state no longer matches (another writer
    /// got there first) or the record does not exist.
    async fn compare_and_set(
        &self,
        id: Uuid,
        expected: ScanState,
        next: ScanState,
    ) -> Result<bool, CodeServiceError>;
}
