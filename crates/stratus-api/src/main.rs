//! Stratus API server entrypoint.

use std::sync::Arc;
use stratus_api::config::AppConfig;
use stratus_api::routes::create_router;
use stratus_api::state::AppState;
use stratus_aws::{load_sdk_config, AwsClient, AwsSettings};
use stratus_db::{
    Database, PgAdvisorStore, PgCostStore, PgDiagramStore, PgResourceStore,
};
use stratus_llm::LlmBridge;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;
    tracing::info!("database ready");

    let settings = AwsSettings {
        region: config.aws_region.clone(),
    };
    let sdk_config = load_sdk_config(&settings).await;
    let cloud = AwsClient::new(&sdk_config);

    let bridge = LlmBridge::new(config.openai_api_key.clone(), config.gemini_api_key.clone());

    let pool = db.pool().clone();
    let state = Arc::new(AppState::new(
        Arc::new(PgResourceStore::new(pool.clone())),
        Arc::new(PgCostStore::new(pool.clone())),
        Arc::new(PgAdvisorStore::new(pool.clone())),
        Arc::new(PgDiagramStore::new(pool)),
        Arc::new(cloud),
        Arc::new(bridge),
    ));

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "stratus-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
