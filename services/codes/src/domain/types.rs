use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Largest accepted scan budget; counters are stored in 32-bit signed columns.
pub const MAX_SCANS_LIMIT: u32 = i32::MAX as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeStatus {
    Active,
    /// Terminal. Never returns to `Active`.
    Inactive,
}

impl CodeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// Why a code went inactive. Written in the same update as the status flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InactiveReason {
    Expired,
    Exhausted,
}

impl InactiveReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Exhausted => "exhausted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "expired" => Some(Self::Expired),
            "exhausted" => Some(Self::Exhausted),
            _ => None,
        }
    }
}

/// The mutable part of a code: the only fields a scan ever writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanState {
    pub scan_count: u32,
    pub status: CodeStatus,
    pub inactive_reason: Option<InactiveReason>,
}

impl ScanState {
    pub fn fresh() -> Self {
        Self {
            scan_count: 0,
            status: CodeStatus::Active,
            inactive_reason: None,
        }
    }
}

/// A scannable code: payload, scan budget and expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRecord {
    pub id: Uuid,
    pub payload: String,
    pub max_scans: u32,
    pub scan_count: u32,
    pub expires_at: DateTime<Utc>,
    pub status: CodeStatus,
    pub inactive_reason: Option<InactiveReason>,
    pub created_at: DateTime<Utc>,
}

impl CodeRecord {
    pub fn scan_state(&self) -> ScanState {
        ScanState {
            scan_count: self.scan_count,
            status: self.status,
            inactive_reason: self.inactive_reason,
        }
    }

    /// Decide what a scan at `now` does to this record.
    ///
    /// Order matters: an inactive record short-circuits before any time or
    /// count comparison, and expiry wins over exhaustion when both hold.
    pub fn decide(&self, now: DateTime<Utc>) -> ScanDecision {
        if self.status == CodeStatus::Inactive {
            return ScanDecision::Refuse(Rejection::Inactive {
                reason: self.inactive_reason,
            });
        }
        if now > self.expires_at {
            return ScanDecision::Deactivate(InactiveReason::Expired);
        }
        if self.scan_count >= self.max_scans {
            return ScanDecision::Deactivate(InactiveReason::Exhausted);
        }
        ScanDecision::Accept
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDecision {
    /// Already inactive; nothing to write.
    Refuse(Rejection),
    /// Flip to inactive for this reason, then refuse.
    Deactivate(InactiveReason),
    /// Spend one scan.
    Accept,
}

impl ScanDecision {
    /// State to persist for this decision. `Refuse` leaves `current` as is.
    pub fn next_state(self, current: ScanState) -> ScanState {
        match self {
            Self::Refuse(_) => current,
            Self::Deactivate(reason) => ScanState {
                scan_count: current.scan_count,
                status: CodeStatus::Inactive,
                inactive_reason: Some(reason),
            },
            Self::Accept => ScanState {
                scan_count: current.scan_count + 1,
                ..current
            },
        }
    }
}

/// Why a scan was refused. These are expected outcomes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The code was already inactive; `reason` is what deactivated it.
    Inactive { reason: Option<InactiveReason> },
    Expired,
    Exhausted,
}

impl From<InactiveReason> for Rejection {
    fn from(reason: InactiveReason) -> Self {
        match reason {
            InactiveReason::Expired => Self::Expired,
            InactiveReason::Exhausted => Self::Exhausted,
        }
    }
}

/// Result of resolving a code id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    NotFound,
    Rejected(Rejection),
    Accepted {
        payload: String,
        scan_count: u32,
        remaining: u32,
    },
}
