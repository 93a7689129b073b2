//! Test helper functions and utilities.

use reqwest::Client;
use std::net::SocketAddr;
use std::sync::Arc;
use stratus_api::routes::create_router;
use stratus_api::state::AppState;
use tokio::net::TcpListener;

use crate::memory::{
    MemoryAdvisorStore, MemoryCostStore, MemoryDiagramStore, MemoryResourceStore, MockBridge,
    MockCloud,
};

/// One in-memory backend per test: the four stores plus the scripted cloud
/// client and LLM bridge, with handles kept so assertions can reach the
/// fakes after requests have run.
pub struct TestBackend {
    pub resources: Arc<MemoryResourceStore>,
    pub costs: Arc<MemoryCostStore>,
    pub advisor: Arc<MemoryAdvisorStore>,
    pub diagrams: Arc<MemoryDiagramStore>,
    pub cloud: Arc<MockCloud>,
    pub bridge: Arc<MockBridge>,
}

impl TestBackend {
    pub fn new() -> Self {
        Self::with_cloud(MockCloud::new())
    }

    pub fn with_cloud(cloud: MockCloud) -> Self {
        Self {
            resources: Arc::new(MemoryResourceStore::default()),
            costs: Arc::new(MemoryCostStore::default()),
            advisor: Arc::new(MemoryAdvisorStore::default()),
            diagrams: Arc::new(MemoryDiagramStore::default()),
            cloud: Arc::new(cloud),
            bridge: Arc::new(MockBridge::new()),
        }
    }

    pub fn state(&self) -> Arc<AppState> {
        Arc::new(AppState::new(
            self.resources.clone(),
            self.costs.clone(),
            self.advisor.clone(),
            self.diagrams.clone(),
            self.cloud.clone(),
            self.bridge.clone(),
        ))
    }
}

impl Default for TestBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Start an API server for testing and return its address.
pub async fn start_test_server(
    state: Arc<AppState>,
) -> anyhow::Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    let app = create_router(state);
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Ok((addr, handle))
}

/// Create an HTTP client for testing.
pub fn test_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("Failed to create test client")
}

/// API test client with base URL.
pub struct ApiTestClient {
    client: Client,
    base_url: String,
}

impl ApiTestClient {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            client: test_client(),
            base_url: format!("http://{}", addr),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.get(self.url(path)).send().await
    }

    pub async fn post<T: serde::Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> reqwest::Result<reqwest::Response> {
        self.client.post(self.url(path)).json(body).send().await
    }

    pub async fn delete(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.delete(self.url(path)).send().await
    }

    /// Check health endpoint.
    pub async fn health(&self) -> anyhow::Result<bool> {
        let resp = self.get("/health").await?;
        Ok(resp.status().is_success())
    }
}
