//! Tag-based resource inventory, served through the read-through cache.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use stratus_cache::{windows, ReadThrough, Source};

use crate::error::ApiResult;
use crate::slots::TagSlot;
use crate::state::AppState;

#[derive(Serialize)]
pub struct TaggedResourcesResponse {
    pub status: &'static str,
    /// Resources grouped by type, each entry the stored attribute mapping
    /// with its id and tags folded in.
    pub data: BTreeMap<String, Vec<Value>>,
    /// "cache" or "fresh". Other cached endpoints say "database"/"aws";
    /// the wording difference is load-bearing for existing clients.
    pub source: &'static str,
}

pub async fn list_tagged(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TaggedResourcesResponse>> {
    let slot = TagSlot {
        store: state.resources.clone(),
        cloud: state.cloud.clone(),
    };
    let (records, source) = ReadThrough::new(windows::tag_inventory())
        .resolve(&slot)
        .await?;

    let mut grouped: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    for record in records {
        let mut entry = match record.data {
            Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        entry.insert("id".to_string(), Value::String(record.id));
        entry.insert("tags".to_string(), record.tags);
        grouped
            .entry(record.resource_type)
            .or_default()
            .push(Value::Object(entry));
    }

    Ok(Json(TaggedResourcesResponse {
        status: "success",
        data: grouped,
        source: match source {
            Source::Cache => "cache",
            Source::Fresh => "fresh",
        },
    }))
}
