//! Cache slots binding the read-through policy to the stores and the cloud
//! client. One slot type per cached domain; each slot is built per request
//! with its identity already applied.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use stratus_cache::CacheSlot;
use stratus_core::advisor::{AdvisorRecord, CheckKind};
use stratus_core::cost::{cost_record_id, CostRecord};
use stratus_core::ports::{AdvisorStore, CloudClient, CostStore, ResourceStore};
use stratus_core::resource::ResourceRecord;
use stratus_core::Result;

/// Cost-and-usage rows, keyed by the reporting period.
pub struct CostSlot {
    pub store: Arc<dyn CostStore>,
    pub cloud: Arc<dyn CloudClient>,
    pub start_date: String,
    pub end_date: String,
}

#[async_trait]
impl CacheSlot for CostSlot {
    type Payload = CostRecord;

    fn domain(&self) -> &'static str {
        "costs"
    }

    async fn load(&self) -> Result<Option<(CostRecord, DateTime<Utc>)>> {
        let id = cost_record_id(&self.start_date, &self.end_date);
        Ok(self
            .store
            .get(&id)
            .await?
            .map(|record| (record.clone(), record.last_updated)))
    }

    async fn fetch(&self) -> Result<CostRecord> {
        let data = self
            .cloud
            .cost_and_usage(&self.start_date, &self.end_date)
            .await?;
        Ok(CostRecord::new(&self.start_date, &self.end_date, data))
    }

    async fn store(&self, payload: &CostRecord) -> Result<()> {
        self.store.upsert(payload).await
    }
}

/// Trusted Advisor datasets, keyed by check kind.
pub struct AdvisorSlot {
    pub store: Arc<dyn AdvisorStore>,
    pub cloud: Arc<dyn CloudClient>,
    pub kind: CheckKind,
}

#[async_trait]
impl CacheSlot for AdvisorSlot {
    type Payload = AdvisorRecord;

    fn domain(&self) -> &'static str {
        "advisor"
    }

    async fn load(&self) -> Result<Option<(AdvisorRecord, DateTime<Utc>)>> {
        Ok(self
            .store
            .get(self.kind)
            .await?
            .map(|record| (record.clone(), record.last_updated)))
    }

    async fn fetch(&self) -> Result<AdvisorRecord> {
        let checks = self.cloud.advisor_checks(self.kind).await?;
        Ok(AdvisorRecord::new(self.kind, checks))
    }

    async fn store(&self, payload: &AdvisorRecord) -> Result<()> {
        self.store.upsert(payload).await
    }
}

/// The whole tag-based resource inventory as one slot. Freshness is judged
/// by the newest row; a refresh replaces the table wholesale (delete-all,
/// then insert-many, in that order and in separate operations).
pub struct TagSlot {
    pub store: Arc<dyn ResourceStore>,
    pub cloud: Arc<dyn CloudClient>,
}

#[async_trait]
impl CacheSlot for TagSlot {
    type Payload = Vec<ResourceRecord>;

    fn domain(&self) -> &'static str {
        "tag_inventory"
    }

    async fn load(&self) -> Result<Option<(Vec<ResourceRecord>, DateTime<Utc>)>> {
        let Some(newest) = self.store.newest_update().await? else {
            return Ok(None);
        };
        let records = self.store.list().await?;
        Ok(Some((records, newest)))
    }

    async fn fetch(&self) -> Result<Vec<ResourceRecord>> {
        self.cloud.tagged_resources().await
    }

    async fn store(&self, payload: &Vec<ResourceRecord>) -> Result<()> {
        self.store.delete_all().await?;
        self.store.insert_many(payload).await
    }
}
