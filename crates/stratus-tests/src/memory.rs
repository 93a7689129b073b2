//! In-memory port implementations for tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use stratus_core::advisor::{filter_flagged, AdvisorRecord, CheckKind, CheckMap};
use stratus_core::cost::CostRecord;
use stratus_core::diagram::Diagram;
use stratus_core::ports::{
    AdvisorStore, AgentBridge, CloudClient, CostStore, DiagramStore, ResourceStore,
};
use stratus_core::presentation::DeckOutline;
use stratus_core::resource::{CallerIdentity, Ec2Instance, ResourceRecord};
use stratus_core::{Error, Result};

#[derive(Default)]
pub struct MemoryResourceStore {
    rows: Mutex<Vec<ResourceRecord>>,
}

#[async_trait]
impl ResourceStore for MemoryResourceStore {
    async fn list(&self) -> Result<Vec<ResourceRecord>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn newest_update(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.last_updated)
            .max())
    }

    async fn delete_all(&self) -> Result<()> {
        self.rows.lock().unwrap().clear();
        Ok(())
    }

    async fn insert_many(&self, records: &[ResourceRecord]) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        for record in records {
            rows.retain(|r| r.id != record.id);
            rows.push(record.clone());
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCostStore {
    rows: Mutex<HashMap<String, CostRecord>>,
}

#[async_trait]
impl CostStore for MemoryCostStore {
    async fn get(&self, id: &str) -> Result<Option<CostRecord>> {
        Ok(self.rows.lock().unwrap().get(id).cloned())
    }

    async fn upsert(&self, record: &CostRecord) -> Result<()> {
        self.rows
            .lock()
            .unwrap()
            .insert(record.id.clone(), record.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryAdvisorStore {
    rows: Mutex<HashMap<&'static str, AdvisorRecord>>,
}

#[async_trait]
impl AdvisorStore for MemoryAdvisorStore {
    async fn get(&self, kind: CheckKind) -> Result<Option<AdvisorRecord>> {
        Ok(self.rows.lock().unwrap().get(kind.as_str()).cloned())
    }

    async fn upsert(&self, record: &AdvisorRecord) -> Result<()> {
        self.rows
            .lock()
            .unwrap()
            .insert(record.check_type.as_str(), record.clone());
        Ok(())
    }
}

/// Diagram store with the same identity semantics as the SQL one: a
/// surrogate id, and nothing preventing duplicate (name, user_id) rows.
#[derive(Default)]
pub struct MemoryDiagramStore {
    rows: Mutex<Vec<Diagram>>,
    next_id: AtomicI64,
}

#[async_trait]
impl DiagramStore for MemoryDiagramStore {
    async fn find_by_name(&self, name: &str, user_id: &str) -> Result<Option<Diagram>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.name == name && d.user_id == user_id)
            .cloned())
    }

    async fn insert(&self, name: &str, user_id: &str, data: &Value) -> Result<Diagram> {
        let now = Utc::now();
        let diagram = Diagram {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: name.to_string(),
            user_id: user_id.to_string(),
            diagram_data: data.clone(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(diagram.clone());
        Ok(diagram)
    }

    async fn update_data(&self, id: i64, data: &Value) -> Result<Diagram> {
        let mut rows = self.rows.lock().unwrap();
        let diagram = rows
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::NotFound("Diagram".to_string()))?;
        diagram.diagram_data = data.clone();
        diagram.updated_at = Utc::now();
        Ok(diagram.clone())
    }

    async fn get(&self, id: i64) -> Result<Option<Diagram>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Diagram>> {
        let mut diagrams: Vec<Diagram> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect();
        diagrams.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(diagrams)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|d| d.id != id);
        Ok(rows.len() < before)
    }
}

/// Scripted cloud client with per-domain fetch counters.
pub struct MockCloud {
    pub instances: Vec<Ec2Instance>,
    pub cost_data: Value,
    /// Raw check payload; `advisor_checks` applies the same flagged-only
    /// filter the real client does at fetch time.
    pub checks: CheckMap,
    pub inventory: Vec<ResourceRecord>,
    /// `None` makes credential validation fail.
    pub identity: Option<CallerIdentity>,
    cost_fetches: AtomicUsize,
    advisor_fetches: AtomicUsize,
    tag_fetches: AtomicUsize,
}

impl MockCloud {
    pub fn new() -> Self {
        Self {
            instances: crate::fixtures::sample_instances(),
            cost_data: crate::fixtures::sample_cost_data(),
            checks: crate::fixtures::sample_checks(),
            inventory: crate::fixtures::sample_inventory(),
            identity: Some(crate::fixtures::sample_identity()),
            cost_fetches: AtomicUsize::new(0),
            advisor_fetches: AtomicUsize::new(0),
            tag_fetches: AtomicUsize::new(0),
        }
    }

    pub fn cost_fetch_count(&self) -> usize {
        self.cost_fetches.load(Ordering::SeqCst)
    }

    pub fn advisor_fetch_count(&self) -> usize {
        self.advisor_fetches.load(Ordering::SeqCst)
    }

    pub fn tag_fetch_count(&self) -> usize {
        self.tag_fetches.load(Ordering::SeqCst)
    }
}

impl Default for MockCloud {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CloudClient for MockCloud {
    async fn ec2_instances(&self) -> Result<Vec<Ec2Instance>> {
        Ok(self.instances.clone())
    }

    async fn cost_and_usage(&self, _start_date: &str, _end_date: &str) -> Result<Value> {
        self.cost_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.cost_data.clone())
    }

    async fn advisor_checks(&self, kind: CheckKind) -> Result<CheckMap> {
        self.advisor_fetches.fetch_add(1, Ordering::SeqCst);
        let mut checks = self.checks.clone();
        if kind == CheckKind::Recommendations {
            checks.retain(|category, _| category == "cost_optimizing");
        }
        Ok(filter_flagged(checks))
    }

    async fn tagged_resources(&self) -> Result<Vec<ResourceRecord>> {
        self.tag_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.inventory.clone())
    }

    async fn validate_credentials(
        &self,
        _access_key_id: &str,
        _secret_access_key: &str,
    ) -> Result<CallerIdentity> {
        self.identity.clone().ok_or_else(|| {
            Error::CredentialValidation(
                "The security token included in the request is invalid".to_string(),
            )
        })
    }
}

/// Scripted LLM bridge; records the context handed to `answer`.
pub struct MockBridge {
    pub chat_reply: String,
    pub image_reply: String,
    pub diagram: Value,
    pub findings_reply: String,
    pub outline: DeckOutline,
    pub last_context: Mutex<Option<String>>,
}

impl MockBridge {
    pub fn new() -> Self {
        Self {
            chat_reply: "Your largest cost driver is EC2.".to_string(),
            image_reply: "The diagram shows a two-tier web application.".to_string(),
            diagram: crate::fixtures::sample_diagram(),
            findings_reply: "1. Rightsize idle instances.".to_string(),
            outline: crate::fixtures::sample_outline(),
            last_context: Mutex::new(None),
        }
    }
}

impl Default for MockBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentBridge for MockBridge {
    async fn answer(&self, context: &str, _question: &str) -> Result<String> {
        *self.last_context.lock().unwrap() = Some(context.to_string());
        Ok(self.chat_reply.clone())
    }

    async fn analyze_image(&self, _image: &[u8], _prompt: &str) -> Result<String> {
        Ok(self.image_reply.clone())
    }

    async fn synthesize_diagram(&self, _inventory: &str) -> Result<Value> {
        Ok(self.diagram.clone())
    }

    async fn analyze_findings(&self, _findings: &str) -> Result<String> {
        Ok(self.findings_reply.clone())
    }

    async fn outline_presentation(&self, _analysis: &str) -> Result<DeckOutline> {
        Ok(self.outline.clone())
    }
}
