//! Conversational endpoint over the account's cached state.

use axum::extract::State;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use stratus_core::advisor::CheckKind;
use stratus_core::cost::cost_record_id;
use stratus_core::{Error, Result};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Assemble the account context the model answers from. Only cached rows
/// are consulted; a chat request never triggers an AWS fetch, so a cold
/// cache yields a thin context rather than a slow answer.
async fn account_context(state: &AppState) -> Result<String> {
    let mut sections = Vec::new();

    let resources = state.resources.list().await?;
    if resources.is_empty() {
        sections.push("Resource inventory: not yet cached.".to_string());
    } else {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in &resources {
            *counts.entry(record.resource_type.as_str()).or_default() += 1;
        }
        let summary = counts
            .iter()
            .map(|(kind, n)| format!("{kind}: {n}"))
            .collect::<Vec<_>>()
            .join(", ");
        sections.push(format!(
            "Resource inventory ({} resources): {summary}",
            resources.len()
        ));
    }

    let end = Utc::now().date_naive();
    let start = end - Duration::days(30);
    let cost_id = cost_record_id(
        &start.format("%Y-%m-%d").to_string(),
        &end.format("%Y-%m-%d").to_string(),
    );
    if let Some(record) = state.costs.get(&cost_id).await? {
        sections.push(format!(
            "Cost data for {} to {}: {}",
            record.start_date, record.end_date, record.data
        ));
    }

    if let Some(record) = state.advisor.get(CheckKind::Recommendations).await? {
        sections.push(format!(
            "Trusted Advisor cost recommendations: {}",
            serde_json::to_string(&record.data)?
        ));
    }

    Ok(sections.join("\n\n"))
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    if request.query.trim().is_empty() {
        return Err(Error::InvalidRequest("query must not be empty".to_string()).into());
    }

    let context = account_context(&state).await?;
    let response = state.bridge.answer(&context, &request.query).await?;

    Ok(Json(ChatResponse { response }))
}
