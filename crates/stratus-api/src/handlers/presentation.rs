//! Presentation structuring and `.pptx` generation.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use stratus_core::presentation::DeckOutline;
use stratus_core::Error;
use stratus_ppt::{render_deck, PPTX_CONTENT_TYPE};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StructureRequest {
    pub analysis: String,
}

/// Turn free-form analysis text into a structured deck outline.
pub async fn structure(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StructureRequest>,
) -> ApiResult<Json<DeckOutline>> {
    if request.analysis.trim().is_empty() {
        return Err(Error::InvalidRequest("analysis text must not be empty".to_string()).into());
    }

    let outline = state.bridge.outline_presentation(&request.analysis).await?;
    Ok(Json(outline))
}

/// Render an outline into `.pptx` bytes served as an attachment.
pub async fn generate(Json(outline): Json<DeckOutline>) -> ApiResult<impl IntoResponse> {
    if outline.title.trim().is_empty() {
        return Err(Error::InvalidRequest("outline title must not be empty".to_string()).into());
    }

    let bytes = render_deck(&outline);
    let filename = format!("aws_analysis_{}.pptx", Utc::now().format("%Y%m%d_%H%M%S"));

    Ok((
        [
            (header::CONTENT_TYPE, PPTX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}
