//! Cache-slot behavior over the in-memory stores, including the
//! bulk-refresh visibility window.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use stratus_api::slots::{AdvisorSlot, CostSlot, TagSlot};
use stratus_cache::{windows, ReadThrough, Source};
use stratus_core::advisor::CheckKind;
use stratus_core::ports::{AdvisorStore, ResourceStore};
use stratus_core::resource::ResourceRecord;
use stratus_core::{Error, Result};
use stratus_tests::memory::{MemoryAdvisorStore, MemoryCostStore, MemoryResourceStore, MockCloud};

fn stale_record(id: &str, resource_type: &str) -> ResourceRecord {
    let mut record = ResourceRecord::new(id, resource_type, serde_json::json!({}));
    record.last_updated = Utc::now() - Duration::days(5000);
    record
}

#[tokio::test]
async fn tag_refresh_replaces_the_table_wholesale() {
    let store = Arc::new(MemoryResourceStore::default());
    store
        .insert_many(&[stale_record("arn:aws:s3:::old-bucket", "s3")])
        .await
        .unwrap();

    let cloud = Arc::new(MockCloud::new());
    let slot = TagSlot {
        store: store.clone(),
        cloud: cloud.clone(),
    };

    let (records, source) = ReadThrough::new(windows::tag_inventory())
        .resolve(&slot)
        .await
        .unwrap();
    assert_eq!(source, Source::Fresh);
    assert_eq!(records.len(), 3);

    // The stale row is gone, not merged.
    let stored = store.list().await.unwrap();
    assert!(stored.iter().all(|r| r.id != "arn:aws:s3:::old-bucket"));
    assert_eq!(stored.len(), 3);
}

#[tokio::test]
async fn tag_inventory_within_window_is_served_without_fetching() {
    let store = Arc::new(MemoryResourceStore::default());
    store
        .insert_many(&[ResourceRecord::new(
            "arn:aws:s3:::fresh-bucket",
            "s3",
            serde_json::json!({}),
        )])
        .await
        .unwrap();

    let cloud = Arc::new(MockCloud::new());
    let slot = TagSlot {
        store,
        cloud: cloud.clone(),
    };

    let (records, source) = ReadThrough::new(windows::tag_inventory())
        .resolve(&slot)
        .await
        .unwrap();
    assert_eq!(source, Source::Cache);
    assert_eq!(records.len(), 1);
    assert_eq!(cloud.tag_fetch_count(), 0);
}

/// Delegates to a real store but runs a reader's `list` from inside
/// `insert_many`, before any row is written. That is exactly where a
/// concurrent request lands when the refresh has deleted but not yet
/// reinserted.
struct MidRefreshReadingStore {
    inner: MemoryResourceStore,
    seen_mid_refresh: std::sync::Mutex<Option<Vec<ResourceRecord>>>,
}

#[async_trait]
impl ResourceStore for MidRefreshReadingStore {
    async fn list(&self) -> Result<Vec<ResourceRecord>> {
        self.inner.list().await
    }

    async fn newest_update(&self) -> Result<Option<chrono::DateTime<Utc>>> {
        self.inner.newest_update().await
    }

    async fn delete_all(&self) -> Result<()> {
        self.inner.delete_all().await
    }

    async fn insert_many(&self, records: &[ResourceRecord]) -> Result<()> {
        let snapshot = self.inner.list().await?;
        *self.seen_mid_refresh.lock().unwrap() = Some(snapshot);
        self.inner.insert_many(records).await
    }
}

#[tokio::test]
async fn reader_between_delete_and_insert_sees_an_empty_table() {
    let store = Arc::new(MidRefreshReadingStore {
        inner: MemoryResourceStore::default(),
        seen_mid_refresh: std::sync::Mutex::new(None),
    });
    store
        .inner
        .insert_many(&[stale_record("arn:aws:s3:::about-to-vanish", "s3")])
        .await
        .unwrap();

    let slot = TagSlot {
        store: store.clone(),
        cloud: Arc::new(MockCloud::new()),
    };

    let (records, source) = ReadThrough::new(Duration::zero()).resolve(&slot).await.unwrap();
    assert_eq!(source, Source::Fresh);
    assert_eq!(records.len(), 3);

    // The interleaved read saw neither the old rows nor the new ones.
    let seen = store.seen_mid_refresh.lock().unwrap().take().unwrap();
    assert!(seen.is_empty());

    // After the refresh completes the table is whole again.
    assert_eq!(store.list().await.unwrap().len(), 3);
}

/// Delegates to a real store but fails every insert, exposing what the
/// delete-then-insert refresh leaves behind when the second step dies.
struct InsertFailingStore {
    inner: MemoryResourceStore,
}

#[async_trait]
impl ResourceStore for InsertFailingStore {
    async fn list(&self) -> Result<Vec<ResourceRecord>> {
        self.inner.list().await
    }

    async fn newest_update(&self) -> Result<Option<chrono::DateTime<Utc>>> {
        self.inner.newest_update().await
    }

    async fn delete_all(&self) -> Result<()> {
        self.inner.delete_all().await
    }

    async fn insert_many(&self, _records: &[ResourceRecord]) -> Result<()> {
        Err(Error::Database("connection reset".to_string()))
    }
}

#[tokio::test]
async fn failed_refresh_leaves_the_inventory_empty() {
    let store = Arc::new(InsertFailingStore {
        inner: MemoryResourceStore::default(),
    });
    store
        .inner
        .insert_many(&[stale_record("arn:aws:s3:::doomed", "s3")])
        .await
        .unwrap();

    let slot = TagSlot {
        store: store.clone(),
        cloud: Arc::new(MockCloud::new()),
    };

    // Zero-width window forces the refresh path.
    let result = ReadThrough::new(Duration::zero()).resolve(&slot).await;
    assert!(matches!(result, Err(Error::Database(_))));

    // The delete already ran; the old rows are unrecoverable.
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn cost_slot_stores_under_the_period_id() {
    let store = Arc::new(MemoryCostStore::default());
    let cloud = Arc::new(MockCloud::new());
    let slot = CostSlot {
        store: store.clone(),
        cloud: cloud.clone(),
        start_date: "2026-07-31".to_string(),
        end_date: "2026-08-30".to_string(),
    };

    let (record, source) = ReadThrough::new(windows::costs()).resolve(&slot).await.unwrap();
    assert_eq!(source, Source::Fresh);
    assert_eq!(record.id, "cost_2026-07-31_to_2026-08-30");

    let (_, source) = ReadThrough::new(windows::costs()).resolve(&slot).await.unwrap();
    assert_eq!(source, Source::Cache);
    assert_eq!(cloud.cost_fetch_count(), 1);
}

#[tokio::test]
async fn expired_advisor_row_is_refetched_and_overwritten() {
    let store = Arc::new(MemoryAdvisorStore::default());
    let cloud = Arc::new(MockCloud::new());
    let slot = AdvisorSlot {
        store: store.clone(),
        cloud: cloud.clone(),
        kind: CheckKind::Recommendations,
    };

    let policy = ReadThrough::new(windows::advisor());
    let (_, source) = policy.resolve(&slot).await.unwrap();
    assert_eq!(source, Source::Fresh);

    // Age the stored row past the one-day window.
    let mut aged = store.get(CheckKind::Recommendations).await.unwrap().unwrap();
    aged.last_updated = Utc::now() - Duration::days(2);
    store.upsert(&aged).await.unwrap();

    let (record, source) = policy.resolve(&slot).await.unwrap();
    assert_eq!(source, Source::Fresh);
    assert_eq!(cloud.advisor_fetch_count(), 2);
    assert!(record.data.contains_key("cost_optimizing"));
    assert!(!record.data.contains_key("security"));
}
