//! Saved architecture diagrams: manual saves and model-synthesized ones.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use stratus_core::diagram::Diagram;
use stratus_core::ports::DiagramStore;
use stratus_core::{Error, Result};

use crate::error::ApiResult;
use crate::state::AppState;

fn default_user() -> String {
    "anonymous".to_string()
}

#[derive(Deserialize)]
pub struct SaveDiagramRequest {
    pub name: String,
    #[serde(default = "default_user")]
    pub user_id: String,
    pub diagram_data: Value,
}

#[derive(Serialize)]
pub struct DiagramListResponse {
    pub diagrams: Vec<Diagram>,
    pub count: usize,
}

/// Save by (name, user_id): overwrite the existing row's data if one is
/// found, insert otherwise. The lookup and the write are separate
/// statements with no constraint backing them, so two concurrent saves of
/// the same name can both miss the lookup and insert duplicate rows.
async fn save_by_name(
    store: &dyn DiagramStore,
    name: &str,
    user_id: &str,
    data: &Value,
) -> Result<Diagram> {
    match store.find_by_name(name, user_id).await? {
        Some(existing) => store.update_data(existing.id, data).await,
        None => store.insert(name, user_id, data).await,
    }
}

pub async fn save(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveDiagramRequest>,
) -> ApiResult<Json<Diagram>> {
    if request.name.trim().is_empty() {
        return Err(Error::InvalidRequest("diagram name must not be empty".to_string()).into());
    }

    let diagram = save_by_name(
        state.diagrams.as_ref(),
        &request.name,
        &request.user_id,
        &request.diagram_data,
    )
    .await?;
    Ok(Json(diagram))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<DiagramListResponse>> {
    let diagrams = state.diagrams.list_for_user(&user_id).await?;
    Ok(Json(DiagramListResponse {
        count: diagrams.len(),
        diagrams,
    }))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Diagram>> {
    let diagram = state
        .diagrams
        .get(id)
        .await?
        .ok_or_else(|| Error::NotFound("Diagram".to_string()))?;
    Ok(Json(diagram))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    if !state.diagrams.delete(id).await? {
        return Err(Error::NotFound("Diagram".to_string()).into());
    }
    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Diagram deleted successfully"
    })))
}

#[derive(Deserialize, Default)]
pub struct GenerateDiagramRequest {
    #[serde(default = "default_user")]
    pub user_id: String,
}

impl GenerateDiagramRequest {
    fn user_id_or_default(self) -> String {
        if self.user_id.is_empty() {
            default_user()
        } else {
            self.user_id
        }
    }
}

/// Synthesize a diagram from the cached resource inventory and persist it
/// under a timestamped name.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    request: Option<Json<GenerateDiagramRequest>>,
) -> ApiResult<Json<Diagram>> {
    let user_id = request
        .map(|Json(r)| r.user_id_or_default())
        .unwrap_or_else(default_user);

    let records = state.resources.list().await?;
    let inventory = if records.is_empty() {
        "No cached resources; produce a typical minimal web application architecture."
            .to_string()
    } else {
        records
            .iter()
            .map(|r| format!("{}: {}", r.resource_type, r.id))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let data = state.bridge.synthesize_diagram(&inventory).await?;
    let name = format!("generated-{}", Utc::now().format("%Y%m%d%H%M%S"));
    let diagram = save_by_name(state.diagrams.as_ref(), &name, &user_id, &data).await?;
    Ok(Json(diagram))
}
