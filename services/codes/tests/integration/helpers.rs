use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use anyhow::anyhow;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use scanpass_codes::domain::clock::Clock;
use scanpass_codes::domain::repository::CodeRepository;
use scanpass_codes::domain::types::{CodeRecord, CodeStatus, ScanState};
use scanpass_codes::error::CodeServiceError;
use scanpass_codes::usecase::create_code::CreateCodeUseCase;
use scanpass_codes::usecase::resolve_code::ResolveCodeUseCase;

pub const TEST_STORAGE_TIMEOUT: StdDuration = StdDuration::from_secs(5);

// ── ManualClock ──────────────────────────────────────────────────────────────

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub fn test_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
}

// ── MockCodeRepo ─────────────────────────────────────────────────────────────

/// In-memory store. Compare-and-set runs under one lock, so it is atomic per
/// id; `find_by_id` yields first so concurrent scans interleave.
#[derive(Clone, Default)]
pub struct MockCodeRepo {
    pub codes: Arc<Mutex<HashMap<Uuid, CodeRecord>>>,
}

impl MockCodeRepo {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(records: Vec<CodeRecord>) -> Self {
        let repo = Self::empty();
        {
            let mut codes = repo.codes.lock().unwrap();
            for record in records {
                codes.insert(record.id, record);
            }
        }
        repo
    }

    /// Returns a shared handle to the stored records for post-execution inspection.
    pub fn codes_handle(&self) -> Arc<Mutex<HashMap<Uuid, CodeRecord>>> {
        Arc::clone(&self.codes)
    }
}

impl CodeRepository for MockCodeRepo {
    async fn insert(&self, record: &CodeRecord) -> Result<(), CodeServiceError> {
        let mut codes = self.codes.lock().unwrap();
        if codes.contains_key(&record.id) {
            return Err(anyhow!("duplicate id {}", record.id).into());
        }
        codes.insert(record.id, record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CodeRecord>, CodeServiceError> {
        tokio::task::yield_now().await;
        Ok(self.codes.lock().unwrap().get(&id).cloned())
    }

    async fn compare_and_set(
        &self,
        id: Uuid,
        expected: ScanState,
        next: ScanState,
    ) -> Result<bool, CodeServiceError> {
        let mut codes = self.codes.lock().unwrap();
        let Some(record) = codes.get_mut(&id) else {
            return Ok(false);
        };
        if record.scan_count != expected.scan_count || record.status != expected.status {
            return Ok(false);
        }
        record.scan_count = next.scan_count;
        record.status = next.status;
        record.inactive_reason = next.inactive_reason;
        Ok(true)
    }
}

// ── FailingCodeRepo ──────────────────────────────────────────────────────────

/// Every call fails as if the database were down.
pub struct FailingCodeRepo;

impl CodeRepository for FailingCodeRepo {
    async fn insert(&self, _record: &CodeRecord) -> Result<(), CodeServiceError> {
        Err(anyhow!("connection refused").into())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<CodeRecord>, CodeServiceError> {
        Err(anyhow!("connection refused").into())
    }

    async fn compare_and_set(
        &self,
        _id: Uuid,
        _expected: ScanState,
        _next: ScanState,
    ) -> Result<bool, CodeServiceError> {
        Err(anyhow!("connection refused").into())
    }
}

// ── SlowCodeRepo ─────────────────────────────────────────────────────────────

/// Every call hangs far longer than any test timeout.
pub struct SlowCodeRepo;

const HANG: StdDuration = StdDuration::from_secs(30);

impl CodeRepository for SlowCodeRepo {
    async fn insert(&self, _record: &CodeRecord) -> Result<(), CodeServiceError> {
        tokio::time::sleep(HANG).await;
        Ok(())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<CodeRecord>, CodeServiceError> {
        tokio::time::sleep(HANG).await;
        Ok(None)
    }

    async fn compare_and_set(
        &self,
        _id: Uuid,
        _expected: ScanState,
        _next: ScanState,
    ) -> Result<bool, CodeServiceError> {
        tokio::time::sleep(HANG).await;
        Ok(false)
    }
}

// ── ContendedCodeRepo ────────────────────────────────────────────────────────

/// Serves one record but never lets a compare-and-set win.
pub struct ContendedCodeRepo {
    pub record: CodeRecord,
    pub finds: Arc<AtomicUsize>,
}

impl CodeRepository for ContendedCodeRepo {
    async fn insert(&self, _record: &CodeRecord) -> Result<(), CodeServiceError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<CodeRecord>, CodeServiceError> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        Ok(Some(self.record.clone()))
    }

    async fn compare_and_set(
        &self,
        _id: Uuid,
        _expected: ScanState,
        _next: ScanState,
    ) -> Result<bool, CodeServiceError> {
        Ok(false)
    }
}

// ── LateCommitCodeRepo ───────────────────────────────────────────────────────

/// Reads from `inner`; each compare-and-set commits there, then hangs before
/// acknowledging.
pub struct LateCommitCodeRepo {
    pub inner: MockCodeRepo,
}

impl CodeRepository for LateCommitCodeRepo {
    async fn insert(&self, record: &CodeRecord) -> Result<(), CodeServiceError> {
        self.inner.insert(record).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CodeRecord>, CodeServiceError> {
        self.inner.find_by_id(id).await
    }

    async fn compare_and_set(
        &self,
        id: Uuid,
        expected: ScanState,
        next: ScanState,
    ) -> Result<bool, CodeServiceError> {
        let swapped = self.inner.compare_and_set(id, expected, next).await?;
        tokio::time::sleep(HANG).await;
        Ok(swapped)
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

/// Active record created at `test_start()`.
pub fn test_record(max_scans: u32, scan_count: u32, ttl: Duration) -> CodeRecord {
    CodeRecord {
        id: Uuid::new_v4(),
        payload: "hello".to_owned(),
        max_scans,
        scan_count,
        expires_at: test_start() + ttl,
        status: CodeStatus::Active,
        inactive_reason: None,
        created_at: test_start(),
    }
}

pub fn create_usecase<R: CodeRepository>(
    codes: R,
    clock: ManualClock,
) -> CreateCodeUseCase<R, ManualClock> {
    CreateCodeUseCase {
        codes,
        clock,
        storage_timeout: TEST_STORAGE_TIMEOUT,
    }
}

pub fn resolve_usecase<R: CodeRepository>(
    codes: R,
    clock: ManualClock,
) -> ResolveCodeUseCase<R, ManualClock> {
    ResolveCodeUseCase {
        codes,
        clock,
        storage_timeout: TEST_STORAGE_TIMEOUT,
    }
}
