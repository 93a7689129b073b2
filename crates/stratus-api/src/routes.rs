//! API route definitions.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    advisor, agent, analysis, auth, costs, diagrams, health, images, presentation, resources, tags,
};
use crate::middleware;
use crate::state::AppState;

/// Create the main API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(health::health))
        .layer(axum::middleware::from_fn(middleware::request_id))
        .layer(middleware::cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/resources/ec2", get(resources::list_ec2))
        .route("/tags/resources", get(tags::list_tagged))
        .route("/costs/summary", get(costs::summary))
        .route("/advisor/details", get(advisor::details))
        .route("/advisor/recommendations", get(advisor::recommendations))
        .route("/agent/chat", post(agent::chat))
        .nest("/diagrams", diagram_routes())
        .route("/images/analyze", post(images::analyze))
        .route("/auth/validate", post(auth::validate))
        .route("/analysis/analyze-with-chatgpt", post(analysis::analyze))
        .route("/presentation/structure-ppt", post(presentation::structure))
        .route("/ppt/generate", post(presentation::generate))
}

fn diagram_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/save", post(diagrams::save))
        .route("/list/{user_id}", get(diagrams::list))
        .route("/generate", post(diagrams::generate))
        .route("/{id}", get(diagrams::get).delete(diagrams::delete))
}
