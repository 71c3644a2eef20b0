use std::time::Duration as StdDuration;

use chrono::Duration;
use tracing::info;
use uuid::Uuid;

use crate::domain::clock::Clock;
use crate::domain::repository::CodeRepository;
use crate::domain::types::{CodeRecord, MAX_SCANS_LIMIT, ScanState};
use crate::error::CodeServiceError;
use crate::usecase::bounded;

pub struct CreateCodeInput {
    pub payload: String,
    pub max_scans: i64,
    pub ttl_minutes: i64,
}

pub struct CreateCodeUseCase<R, C>
where
    R: CodeRepository,
    C: Clock,
{
    pub codes: R,
    pub clock: C,
    pub storage_timeout: StdDuration,
}

impl<R, C> CreateCodeUseCase<R, C>
where
    R: CodeRepository,
    C: Clock,
{
    pub async fn execute(&self, input: CreateCodeInput) -> Result<CodeRecord, CodeServiceError> {
        // 1. Validate before anything reaches storage
        let max_scans = u32::try_from(input.max_scans)
            .ok()
            .filter(|n| (1..=MAX_SCANS_LIMIT).contains(n))
            .ok_or(CodeServiceError::InvalidMaxScans)?;
        if input.ttl_minutes <= 0 {
            return Err(CodeServiceError::InvalidTtl);
        }
        let now = self.clock.now();
        let expires_at = Duration::try_minutes(input.ttl_minutes)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(CodeServiceError::InvalidTtl)?;

        // 2. Build the record
        let state = ScanState::fresh();
        let record = CodeRecord {
            id: Uuid::new_v4(),
            payload: input.payload,
            max_scans,
            scan_count: state.scan_count,
            expires_at,
            status: state.status,
            inactive_reason: state.inactive_reason,
            created_at: now,
        };

        // 3. Persist
        bounded(
            self.storage_timeout,
            "insert code",
            self.codes.insert(&record),
        )
        .await?;

        info!(
            code_id = %record.id,
            max_scans,
            expires_at = %record.expires_at,
            "code created"
        );
        Ok(record)
    }
}
