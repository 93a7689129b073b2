//! Model-backed analysis of Trusted Advisor findings.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use stratus_core::Error;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    /// Flagged advisor entries, as returned by the advisor endpoints.
    #[serde(default)]
    pub errors: Vec<Value>,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub timestamp: String,
    pub analysis: String,
    pub error_count: usize,
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    if request.errors.is_empty() {
        return Err(Error::InvalidRequest("no errors provided for analysis".to_string()).into());
    }

    let findings = request
        .errors
        .iter()
        .map(|entry| {
            let name = entry
                .get("checkName")
                .and_then(Value::as_str)
                .unwrap_or("unnamed check");
            let category = entry
                .get("category")
                .and_then(Value::as_str)
                .unwrap_or("uncategorized");
            let flagged = entry
                .get("resources")
                .and_then(Value::as_array)
                .map(|r| r.len())
                .unwrap_or(0);
            let details = entry.get("details").and_then(Value::as_str).unwrap_or("");
            format!("- {name} [{category}]: {flagged} resources flagged. {details}")
        })
        .collect::<Vec<_>>()
        .join("\n");

    let analysis = state.bridge.analyze_findings(&findings).await?;

    Ok(Json(AnalyzeResponse {
        timestamp: Utc::now().to_rfc3339(),
        analysis,
        error_count: request.errors.len(),
    }))
}
