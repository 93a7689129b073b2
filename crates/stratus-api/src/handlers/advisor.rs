//! Trusted Advisor endpoints: full details and cost-optimizing
//! recommendations, both cached for a day.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use stratus_cache::{windows, ReadThrough, Source};
use stratus_core::advisor::{CheckKind, CheckMap};

use crate::error::ApiResult;
use crate::slots::AdvisorSlot;
use crate::state::AppState;

#[derive(Serialize)]
pub struct AdvisorResponse {
    pub status: &'static str,
    pub data: CheckMap,
    /// "database" or "aws".
    pub source: &'static str,
}

async fn resolve(state: Arc<AppState>, kind: CheckKind) -> ApiResult<Json<AdvisorResponse>> {
    let slot = AdvisorSlot {
        store: state.advisor.clone(),
        cloud: state.cloud.clone(),
        kind,
    };
    let (record, source) = ReadThrough::new(windows::advisor()).resolve(&slot).await?;

    Ok(Json(AdvisorResponse {
        status: "success",
        data: record.data,
        source: match source {
            Source::Cache => "database",
            Source::Fresh => "aws",
        },
    }))
}

pub async fn details(State(state): State<Arc<AppState>>) -> ApiResult<Json<AdvisorResponse>> {
    resolve(state, CheckKind::Details).await
}

pub async fn recommendations(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AdvisorResponse>> {
    resolve(state, CheckKind::Recommendations).await
}
