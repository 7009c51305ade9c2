use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::clock::Clock;
use crate::error::AppResult;
use crate::models::{GENERATE_ACTION, USAGE_QUOTA};
use crate::storage::{UsageLedger, UsageStore};

/// Outcome of a gate check
#[derive(Debug, Clone)]
pub struct GateVerdict {
    pub allowed: bool,
    pub current_count: u32,
    /// Best-effort time of the next window reset, for display
    pub resets_at: DateTime<Utc>,
    /// Whole seconds until that reset, clamped to at least 1; this is the
    /// Retry-After value when the verdict is a denial
    pub retry_after_secs: u64,
}

/// Decides whether one more pipeline invocation may run, and records that
/// one did.
///
/// The quota is global: one counter shared by every caller of the service.
/// `check` is advisory and `record` is a post-completion commit, so two
/// callers that both pass `check` near the quota edge can both complete —
/// slight over-admission under concurrent load is accepted. What is NOT
/// accepted is a lost update: the lock below makes the load-increment-save
/// sequence of `record` mutually exclusive.
pub struct UsageGateService {
    ledger: UsageLedger,
    write_lock: Mutex<()>,
}

impl UsageGateService {
    pub fn new(store: Arc<dyn UsageStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            ledger: UsageLedger::new(store, clock),
            write_lock: Mutex::new(()),
        }
    }

    /// Is one more invocation currently permitted?
    ///
    /// Pure query apart from the lazy reset normalization inside the ledger
    /// load; safe to call repeatedly and speculatively.
    pub async fn check(&self) -> AppResult<GateVerdict> {
        // The load may persist a reset; share the writer lock with record
        let _guard = self.write_lock.lock().await;

        let record = self.ledger.load().await?;
        let resets_at = record.resets_at();
        let retry_after_secs = (resets_at - self.ledger.now()).num_seconds().max(1) as u64;
        Ok(GateVerdict {
            allowed: record.usage_count < USAGE_QUOTA,
            current_count: record.usage_count,
            resets_at,
            retry_after_secs,
        })
    }

    /// Commits one completed invocation and returns the new count.
    ///
    /// Only call after the gated action has finished; this is bookkeeping,
    /// not a reservation.
    pub async fn record(&self) -> AppResult<u32> {
        let _guard = self.write_lock.lock().await;

        let mut record = self.ledger.load().await?;
        let new_count = record.record_usage(self.ledger.now(), GENERATE_ACTION);
        self.ledger.save(&record).await?;

        log::info!("Usage recorded: {}/{} this window", new_count, USAGE_QUOTA);
        Ok(new_count)
    }
}
