use std::time::Duration;

use anyhow::anyhow;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::clock::Clock;
use crate::domain::repository::CodeRepository;
use crate::domain::types::{ScanDecision, ScanOutcome};
use crate::error::CodeServiceError;
use crate::usecase::bounded;

pub struct ResolveCodeUseCase<R, C>
where
    R: CodeRepository,
    C: Clock,
{
    pub codes: R,
    pub clock: C,
    pub storage_timeout: Duration,
}

impl<R, C> ResolveCodeUseCase<R, C>
where
    R: CodeRepository,
    C: Clock,
{
    /// Resolve one scan of `id`.
    ///
    /// Read, decide and write run as a compare-and-set on the record's scan
    /// state. When another caller changes the record in between, the scan is
    /// re-read and re-decided against the newer state.
    pub async fn execute(&self, id: &str) -> Result<ScanOutcome, CodeServiceError> {
        // Not a UUID, so it cannot name a code.
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(ScanOutcome::NotFound);
        };

        let mut attempt: u64 = 0;
        loop {
            attempt += 1;

            let Some(record) = bounded(
                self.storage_timeout,
                "find code",
                self.codes.find_by_id(id),
            )
            .await?
            else {
                return Ok(ScanOutcome::NotFound);
            };

            // Every lost race is another caller committing a transition, and a
            // record admits at most max_scans + 1 of them.
            if attempt > u64::from(record.max_scans) + 2 {
                return Err(anyhow!(
                    "scan state of code {id} still changing after {attempt} attempts"
                )
                .into());
            }

            let decision = record.decide(self.clock.now());
            if let ScanDecision::Refuse(rejection) = decision {
                return Ok(ScanOutcome::Rejected(rejection));
            }

            let current = record.scan_state();
            let next = decision.next_state(current);
            let swapped = bounded(
                self.storage_timeout,
                "compare-and-set scan state",
                self.codes.compare_and_set(id, current, next),
            )
            .await?;
            if !swapped {
                debug!(code_id = %id, attempt, "scan state changed concurrently, retrying");
                continue;
            }

            return Ok(match decision {
                ScanDecision::Deactivate(reason) => {
                    info!(code_id = %id, reason = reason.as_str(), "code deactivated");
                    ScanOutcome::Rejected(reason.into())
                }
                ScanDecision::Accept => {
                    let remaining = record.max_scans - next.scan_count;
                    debug!(
                        code_id = %id,
                        scan_count = next.scan_count,
                        remaining,
                        "scan accepted"
                    );
                    ScanOutcome::Accepted {
                        payload: record.payload,
                        scan_count: next.scan_count,
                        remaining,
                    }
                }
                // Refuse writes nothing, so it returned before the swap.
                ScanDecision::Refuse(rejection) => ScanOutcome::Rejected(rejection),
            });
        }
    }
}
