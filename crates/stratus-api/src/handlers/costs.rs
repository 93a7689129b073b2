//! Cost-and-usage summary for the trailing thirty days.

use axum::extract::State;
use axum::Json;
use chrono::{Duration, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use stratus_cache::{windows, ReadThrough, Source};

use crate::error::ApiResult;
use crate::slots::CostSlot;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CostSummaryResponse {
    pub status: &'static str,
    pub data: Value,
    /// "database" or "aws" (not "cache"/"fresh" as the tags endpoint says).
    pub source: &'static str,
}

pub async fn summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<CostSummaryResponse>> {
    let end = Utc::now().date_naive();
    let start = end - Duration::days(30);

    let slot = CostSlot {
        store: state.costs.clone(),
        cloud: state.cloud.clone(),
        start_date: start.format("%Y-%m-%d").to_string(),
        end_date: end.format("%Y-%m-%d").to_string(),
    };
    let (record, source) = ReadThrough::new(windows::costs()).resolve(&slot).await?;

    Ok(Json(CostSummaryResponse {
        status: "success",
        data: record.data,
        source: match source {
            Source::Cache => "database",
            Source::Fresh => "aws",
        },
    }))
}
