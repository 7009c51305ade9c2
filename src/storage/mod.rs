//! Usage ledger storage.
//!
//! The persisted usage record sits behind the [`UsageStore`] trait so the
//! backend stays swappable: a JSON file in production, an in-memory fake in
//! tests. [`UsageLedger`] layers the lazy reset rule and corruption
//! self-healing on top of whichever store is injected.

mod file;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use file::FileUsageStore;
pub use memory::MemoryUsageStore;

use crate::clock::Clock;
use crate::error::AppResult;
use crate::models::UsageRecord;

/// Raw persistence for the usage singleton.
///
/// `read` never fails: a missing or unreadable record is reported as `None`
/// and the ledger reinitializes from scratch. `write` must be atomic — a
/// concurrent or subsequent `read` sees either the old record or the new one,
/// never a torn write.
#[async_trait]
pub trait UsageStore: Send + Sync {
    async fn read(&self) -> Option<UsageRecord>;
    async fn write(&self, record: &UsageRecord) -> AppResult<()>;
}

/// Durable view of the usage record with the reset rule applied.
///
/// Every `load` normalizes staleness before handing the record out: an
/// elapsed window is reset (and the reset persisted) so callers never observe
/// a stale count.
pub struct UsageLedger {
    store: Arc<dyn UsageStore>,
    clock: Arc<dyn Clock>,
}

impl UsageLedger {
    pub fn new(store: Arc<dyn UsageStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Loads the current record, initializing or lazily resetting it first.
    ///
    /// Missing and corrupt state are treated identically: reinitialize a
    /// zero record rather than fail.
    pub async fn load(&self) -> AppResult<UsageRecord> {
        let now = self.clock.now();

        match self.store.read().await {
            Some(record) if !record.window_expired(now) => Ok(record),
            Some(_) => {
                log::info!("Usage window elapsed, resetting counter");
                let fresh = UsageRecord::fresh(now);
                self.store.write(&fresh).await?;
                Ok(fresh)
            }
            None => {
                let fresh = UsageRecord::fresh(now);
                self.store.write(&fresh).await?;
                Ok(fresh)
            }
        }
    }

    /// Overwrites the persisted record
    pub async fn save(&self, record: &UsageRecord) -> AppResult<()> {
        self.store.write(record).await
    }
}
