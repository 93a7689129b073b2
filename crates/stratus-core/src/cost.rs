//! Cached cost-and-usage records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One cached Cost Explorer response, identified by its reporting period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRecord {
    pub id: String,
    pub start_date: String,
    pub end_date: String,
    /// Provider cost breakdown (results by time, grouped by service).
    pub data: Value,
    pub last_updated: DateTime<Utc>,
}

impl CostRecord {
    pub fn new(start_date: &str, end_date: &str, data: Value) -> Self {
        Self {
            id: cost_record_id(start_date, end_date),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            data,
            last_updated: Utc::now(),
        }
    }
}

/// Identity key for a cost record: `cost_<start>_to_<end>`.
pub fn cost_record_id(start_date: &str, end_date: &str) -> String {
    format!("cost_{start_date}_to_{end_date}")
}
