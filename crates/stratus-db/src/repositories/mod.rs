//! PostgreSQL store implementations.

pub mod advisor;
pub mod cost;
pub mod diagram;
pub mod resource;

pub use advisor::PgAdvisorStore;
pub use cost::PgCostStore;
pub use diagram::PgDiagramStore;
pub use resource::PgResourceStore;
