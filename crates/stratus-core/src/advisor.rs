//! Trusted Advisor check records and the storage filter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Which advisor dataset a cache row holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    /// Full check results across categories.
    Details,
    /// Cost-optimizing recommendations only.
    Recommendations,
}

impl CheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::Details => "details",
            CheckKind::Recommendations => "recommendations",
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisor payload: category name to ordered list of check results.
pub type CheckMap = BTreeMap<String, Vec<Value>>;

/// One cached advisor dataset, keyed by check kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorRecord {
    pub check_type: CheckKind,
    pub data: CheckMap,
    pub last_updated: DateTime<Utc>,
}

impl AdvisorRecord {
    pub fn new(check_type: CheckKind, data: CheckMap) -> Self {
        Self {
            check_type,
            data,
            last_updated: Utc::now(),
        }
    }
}

/// Reduce a fetched advisor payload before it enters the cache.
///
/// Only checks whose status is `warning` or `error` (case-insensitive)
/// survive; categories left empty after filtering are dropped entirely.
/// Runs on every fetch, never on cached reads, so OK/informational entries
/// are unrecoverable from the cache row once stored.
pub fn filter_flagged(checks: CheckMap) -> CheckMap {
    checks
        .into_iter()
        .filter_map(|(category, entries)| {
            let flagged: Vec<Value> = entries
                .into_iter()
                .filter(|entry| {
                    entry
                        .get("status")
                        .and_then(Value::as_str)
                        .map(|s| {
                            let s = s.to_ascii_lowercase();
                            s == "warning" || s == "error"
                        })
                        .unwrap_or(false)
                })
                .collect();
            if flagged.is_empty() {
                None
            } else {
                Some((category, flagged))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(status: &str) -> Value {
        json!({"id": "abc", "name": "Idle Load Balancers", "status": status})
    }

    #[test]
    fn retains_warning_and_error_case_insensitively() {
        let mut map = CheckMap::new();
        map.insert(
            "cost_optimizing".to_string(),
            vec![check("OK"), check("warning"), check("Error"), check("ok")],
        );

        let filtered = filter_flagged(map);
        let entries = &filtered["cost_optimizing"];
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["status"], "warning");
        assert_eq!(entries[1]["status"], "Error");
    }

    #[test]
    fn drops_categories_with_only_ok_entries() {
        let mut map = CheckMap::new();
        map.insert("fault_tolerance".to_string(), vec![check("OK"), check("ok")]);
        map.insert("security".to_string(), vec![check("error")]);

        let filtered = filter_flagged(map);
        assert!(!filtered.contains_key("fault_tolerance"));
        assert_eq!(filtered["security"].len(), 1);
    }

    #[test]
    fn missing_status_field_is_dropped() {
        let mut map = CheckMap::new();
        map.insert("security".to_string(), vec![json!({"id": "x"})]);
        assert!(filter_flagged(map).is_empty());
    }
}
