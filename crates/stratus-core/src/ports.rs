//! Port traits (hexagonal architecture).
//!
//! These traits define the interfaces between the core domain and external
//! adapters: the PostgreSQL cache store, the AWS client, and the LLM bridge.

use crate::advisor::{AdvisorRecord, CheckKind, CheckMap};
use crate::cost::CostRecord;
use crate::diagram::Diagram;
use crate::presentation::DeckOutline;
use crate::resource::{CallerIdentity, Ec2Instance, ResourceRecord};
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Cache store for the deduplicated resource inventory.
///
/// A full refresh is delete-all followed by insert-many, deliberately in
/// separate operations: a reader landing between the two observes an empty
/// table. Payloads are idempotent snapshots, so the last writer wins.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// All cached resource rows.
    async fn list(&self) -> Result<Vec<ResourceRecord>>;

    /// Timestamp of the most recent refresh, if any rows exist.
    async fn newest_update(&self) -> Result<Option<chrono::DateTime<chrono::Utc>>>;

    /// Drop the entire inventory.
    async fn delete_all(&self) -> Result<()>;

    /// Insert a refreshed inventory.
    async fn insert_many(&self, records: &[ResourceRecord]) -> Result<()>;
}

/// Cache store for cost-and-usage rows, keyed by `cost_<start>_to_<end>`.
#[async_trait]
pub trait CostStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<CostRecord>>;

    /// Insert if absent, else overwrite payload and timestamp.
    async fn upsert(&self, record: &CostRecord) -> Result<()>;
}

/// Cache store for advisor datasets, one row per check kind.
#[async_trait]
pub trait AdvisorStore: Send + Sync {
    async fn get(&self, kind: CheckKind) -> Result<Option<AdvisorRecord>>;

    /// Insert if absent, else overwrite payload and timestamp.
    async fn upsert(&self, record: &AdvisorRecord) -> Result<()>;
}

/// Store for saved architecture diagrams.
#[async_trait]
pub trait DiagramStore: Send + Sync {
    async fn find_by_name(&self, name: &str, user_id: &str) -> Result<Option<Diagram>>;

    async fn insert(&self, name: &str, user_id: &str, data: &Value) -> Result<Diagram>;

    async fn update_data(&self, id: i64, data: &Value) -> Result<Diagram>;

    async fn get(&self, id: i64) -> Result<Option<Diagram>>;

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Diagram>>;

    /// Delete a diagram; `false` if no row had that id.
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// Wrapper over the cloud provider's APIs. Pure request/response; no retry
/// or backoff beyond what the underlying SDK does implicitly.
#[async_trait]
pub trait CloudClient: Send + Sync {
    /// Enumerate EC2 instances in the configured region.
    async fn ec2_instances(&self) -> Result<Vec<Ec2Instance>>;

    /// Cost-and-usage breakdown for a reporting period (daily granularity,
    /// grouped by service).
    async fn cost_and_usage(&self, start_date: &str, end_date: &str) -> Result<Value>;

    /// Trusted Advisor results grouped by category, already reduced to
    /// flagged (warning/error) entries.
    async fn advisor_checks(&self, kind: CheckKind) -> Result<CheckMap>;

    /// Deduplicated, typed resource inventory merged from the tag-search
    /// API and type-specific enumerations.
    async fn tagged_resources(&self) -> Result<Vec<ResourceRecord>>;

    /// Validate a credential pair against STS.
    async fn validate_credentials(
        &self,
        access_key_id: &str,
        secret_access_key: &str,
    ) -> Result<CallerIdentity>;
}

/// Narrow interface over the LLM provider. Planning, tool dispatch, and any
/// code the model decides to run happen on the provider side; this trait
/// only carries prompts out and text or parsed JSON back.
#[async_trait]
pub trait AgentBridge: Send + Sync {
    /// Answer a natural-language question given an account-context string.
    async fn answer(&self, context: &str, question: &str) -> Result<String>;

    /// Interpret an uploaded architecture diagram image.
    async fn analyze_image(&self, image: &[u8], prompt: &str) -> Result<String>;

    /// Synthesize a node/edge diagram for the given inventory description.
    async fn synthesize_diagram(&self, inventory: &str) -> Result<Value>;

    /// Analyze Trusted Advisor findings into prose recommendations.
    async fn analyze_findings(&self, findings: &str) -> Result<String>;

    /// Turn an analysis text into a structured slide-deck outline.
    async fn outline_presentation(&self, analysis: &str) -> Result<DeckOutline>;
}
