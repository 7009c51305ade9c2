use async_trait::async_trait;
use tokio::sync::RwLock;

use super::UsageStore;
use crate::error::AppResult;
use crate::models::UsageRecord;

/// In-memory usage store for tests and ephemeral deployments
#[derive(Default)]
pub struct MemoryUsageStore {
    record: RwLock<Option<UsageRecord>>,
}

impl MemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds the store with a record (test fixture helper)
    pub fn seeded(record: UsageRecord) -> Self {
        Self {
            record: RwLock::new(Some(record)),
        }
    }
}

#[async_trait]
impl UsageStore for MemoryUsageStore {
    async fn read(&self) -> Option<UsageRecord> {
        self.record.read().await.clone()
    }

    async fn write(&self, record: &UsageRecord) -> AppResult<()> {
        *self.record.write().await = Some(record.clone());
        Ok(())
    }
}
