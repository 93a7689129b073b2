//! EC2 instance listing. Deliberately uncached: every call goes to the
//! provider, unlike the tag inventory next door.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use stratus_core::resource::Ec2Instance;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Serialize)]
pub struct Ec2ListResponse {
    pub status: &'static str,
    pub data: Vec<Ec2Instance>,
}

pub async fn list_ec2(State(state): State<Arc<AppState>>) -> ApiResult<Json<Ec2ListResponse>> {
    let instances = state.cloud.ec2_instances().await?;
    Ok(Json(Ec2ListResponse {
        status: "success",
        data: instances,
    }))
}
