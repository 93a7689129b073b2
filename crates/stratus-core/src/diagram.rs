//! Architecture diagram records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A saved architecture diagram. Identity is the surrogate row id; the
/// (name, user_id) pair is kept unique by query-before-insert in the save
/// path, not by a database constraint, so two concurrent saves can race
/// into duplicate rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagram {
    pub id: i64,
    pub name: String,
    pub user_id: String,
    /// Graph structure: nodes and edges, each an opaque attribute mapping.
    pub diagram_data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Service types the diagram synthesizer is allowed to emit.
pub const DIAGRAM_SERVICE_TYPES: &[&str] = &[
    "ec2",
    "s3",
    "rds",
    "lambda",
    "dynamodb",
    "elb",
    "cloudfront",
    "apigateway",
    "sqs",
    "sns",
    "vpc",
    "subnet",
    "internet_gateway",
    "nat_gateway",
    "user",
];

/// Validate a synthesized diagram against the node/edge schema.
///
/// Every node needs `id`, `type` (from [`DIAGRAM_SERVICE_TYPES`]) and
/// `label`; every edge needs `id`, `source` and `target` referring to node
/// ids. Returns the offending detail on failure.
pub fn validate_diagram(diagram: &Value) -> std::result::Result<(), String> {
    let nodes = diagram
        .get("nodes")
        .and_then(Value::as_array)
        .ok_or("missing nodes array")?;
    let edges = diagram
        .get("edges")
        .and_then(Value::as_array)
        .ok_or("missing edges array")?;

    let mut node_ids = std::collections::HashSet::new();
    for node in nodes {
        let id = node
            .get("id")
            .and_then(Value::as_str)
            .ok_or("node without id")?;
        let service = node
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| format!("node {id} without type"))?;
        if !DIAGRAM_SERVICE_TYPES.contains(&service) {
            return Err(format!("node {id} has unknown service type {service}"));
        }
        if node.get("label").and_then(Value::as_str).is_none() {
            return Err(format!("node {id} without label"));
        }
        node_ids.insert(id);
    }

    for edge in edges {
        let id = edge
            .get("id")
            .and_then(Value::as_str)
            .ok_or("edge without id")?;
        for end in ["source", "target"] {
            let node = edge
                .get(end)
                .and_then(Value::as_str)
                .ok_or_else(|| format!("edge {id} without {end}"))?;
            if !node_ids.contains(node) {
                return Err(format!("edge {id} references unknown node {node}"));
            }
        }
    }

    Ok(())
}
