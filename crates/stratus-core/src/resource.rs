//! Cached AWS resource inventory records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One discovered AWS resource, keyed by its provider-assigned identity
/// (usually an ARN, or a native ID for resources found by type-specific
/// enumeration).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    pub resource_type: String,
    /// Tag list as reported by the tagging API.
    pub tags: Value,
    /// Arbitrary attribute mapping; shape varies by resource type.
    pub data: Value,
    pub last_updated: DateTime<Utc>,
}

impl ResourceRecord {
    pub fn new(id: impl Into<String>, resource_type: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            resource_type: resource_type.into(),
            tags: Value::Array(vec![]),
            data,
            last_updated: Utc::now(),
        }
    }

    pub fn with_tags(mut self, tags: Value) -> Self {
        self.tags = tags;
        self
    }
}

/// An EC2 instance as exposed by `GET /api/resources/ec2`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ec2Instance {
    pub id: String,
    #[serde(rename = "type")]
    pub instance_type: String,
    pub state: String,
    pub launch_time: Option<String>,
}

/// STS caller identity returned by credential validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub account: String,
    pub arn: String,
    pub user_id: String,
}
