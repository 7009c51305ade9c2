use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::UsageStore;
use crate::error::AppResult;
use crate::models::UsageRecord;

/// JSON-file backed usage store.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous record intact and a `read` never sees
/// a half-written file.
pub struct FileUsageStore {
    path: PathBuf,
}

impl FileUsageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl UsageStore for FileUsageStore {
    async fn read(&self) -> Option<UsageRecord> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!(
                    "Usage file {} unreadable ({}), reinitializing",
                    self.path.display(),
                    e
                );
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!(
                    "Usage file {} corrupt ({}), reinitializing",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    async fn write(&self, record: &UsageRecord) -> AppResult<()> {
        let json = serde_json::to_vec_pretty(record)
            .map_err(|e| crate::error::AppError::Internal(e.to_string()))?;

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
