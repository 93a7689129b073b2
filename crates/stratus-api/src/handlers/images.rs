//! Architecture image analysis.

use axum::extract::State;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stratus_core::Error;
use stratus_llm::prompts::DEFAULT_IMAGE_PROMPT;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AnalyzeImageRequest {
    /// Base64-encoded PNG, with or without a `data:image/png;base64,`
    /// prefix.
    pub image_data: String,
    pub prompt: Option<String>,
}

#[derive(Serialize)]
pub struct AnalyzeImageResponse {
    pub response: String,
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeImageRequest>,
) -> ApiResult<Json<AnalyzeImageResponse>> {
    let encoded = match request.image_data.split_once(',') {
        Some((_, body)) => body,
        None => request.image_data.as_str(),
    };
    let image = BASE64
        .decode(encoded.trim())
        .map_err(|e| Error::InvalidRequest(format!("image is not valid base64: {e}")))?;

    let prompt = request
        .prompt
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE_PROMPT.to_string());

    let response = state.bridge.analyze_image(&image, &prompt).await?;
    Ok(Json(AnalyzeImageResponse { response }))
}
