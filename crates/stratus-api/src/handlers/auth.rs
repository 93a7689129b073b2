//! AWS credential validation.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stratus_core::resource::CallerIdentity;
use stratus_core::Error;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub access_key_id: String,
    pub secret_access_key: String,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub user: CallerIdentity,
}

pub async fn validate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ValidateRequest>,
) -> ApiResult<Json<ValidateResponse>> {
    if request.access_key_id.is_empty() || request.secret_access_key.is_empty() {
        return Err(Error::InvalidRequest(
            "accessKeyId and secretAccessKey are required".to_string(),
        )
        .into());
    }

    let user = state
        .cloud
        .validate_credentials(&request.access_key_id, &request.secret_access_key)
        .await?;

    Ok(Json(ValidateResponse {
        status: "success",
        message: "Credentials validated successfully",
        user,
    }))
}
