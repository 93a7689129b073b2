//! Application state shared across handlers.

use std::sync::Arc;
use stratus_core::ports::{
    AdvisorStore, AgentBridge, CloudClient, CostStore, DiagramStore, ResourceStore,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub resources: Arc<dyn ResourceStore>,
    pub costs: Arc<dyn CostStore>,
    pub advisor: Arc<dyn AdvisorStore>,
    pub diagrams: Arc<dyn DiagramStore>,
    pub cloud: Arc<dyn CloudClient>,
    pub bridge: Arc<dyn AgentBridge>,
}

impl AppState {
    pub fn new(
        resources: Arc<dyn ResourceStore>,
        costs: Arc<dyn CostStore>,
        advisor: Arc<dyn AdvisorStore>,
        diagrams: Arc<dyn DiagramStore>,
        cloud: Arc<dyn CloudClient>,
        bridge: Arc<dyn AgentBridge>,
    ) -> Self {
        Self {
            resources,
            costs,
            advisor,
            diagrams,
            cloud,
            bridge,
        }
    }
}
