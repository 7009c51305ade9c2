//! Integration tests for the JSON file store: durability, atomic writes,
//! and self-healing on missing or corrupt state.

use std::sync::Arc;

use chrono::Duration;
use pretty_assertions::assert_eq;

use imaginarrate::models::{UsageRecord, GENERATE_ACTION};
use imaginarrate::storage::{FileUsageStore, UsageStore};

use crate::common::{gate_with, t0, ManualClock};

fn store_in(dir: &tempfile::TempDir) -> FileUsageStore {
    FileUsageStore::new(dir.path().join("usage.json"))
}

#[tokio::test]
async fn test_write_then_read_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let mut record = UsageRecord::fresh(t0());
    record.record_usage(t0() + Duration::minutes(1), GENERATE_ACTION);

    store.write(&record).await.unwrap();
    assert_eq!(store.read().await.unwrap(), record);
}

#[tokio::test]
async fn test_read_missing_file_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    assert!(store.read().await.is_none());
}

#[tokio::test]
async fn test_corrupt_file_reads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    std::fs::write(store.path(), b"{ not json at all").unwrap();
    assert!(store.read().await.is_none());

    // Wrong shape is also corrupt
    std::fs::write(store.path(), br#"{"usage_count": "three"}"#).unwrap();
    assert!(store.read().await.is_none());
}

#[tokio::test]
async fn test_gate_self_heals_over_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(store_in(&dir));
    std::fs::write(store.path(), b"\xff\xfe garbage").unwrap();

    let clock = ManualClock::new(t0());
    let gate = gate_with(store.clone(), clock);

    // Not an error: the ledger reinitializes a zero record
    let verdict = gate.check().await.unwrap();
    assert!(verdict.allowed);
    assert_eq!(verdict.current_count, 0);

    // And the healed record is persisted as valid JSON
    let healed = store.read().await.unwrap();
    assert_eq!(healed, UsageRecord::fresh(t0()));
}

#[tokio::test]
async fn test_write_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.write(&UsageRecord::fresh(t0())).await.unwrap();

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("usage.json")]);
}

#[tokio::test]
async fn test_lazy_reset_is_persisted_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(store_in(&dir));

    // A stale exhausted record from a previous run
    let mut stale = UsageRecord::fresh(t0());
    for _ in 0..3 {
        stale.record_usage(t0(), GENERATE_ACTION);
    }
    store.write(&stale).await.unwrap();

    let clock = ManualClock::new(t0() + Duration::hours(2));
    let gate = gate_with(store.clone(), clock);

    let verdict = gate.check().await.unwrap();
    assert!(verdict.allowed);
    assert_eq!(verdict.current_count, 0);

    let on_disk = store.read().await.unwrap();
    assert_eq!(on_disk.usage_count, 0);
    assert!(on_disk.usage_history.is_empty());
    assert_eq!(on_disk.last_reset, t0() + Duration::hours(2));
}
