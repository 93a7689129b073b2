//! Integration test infrastructure for Stratus.
//!
//! In-memory implementations of the store and client ports, plus helpers
//! for spinning up the API server on an ephemeral port. No external
//! services are required; the fakes mirror the observable behavior of the
//! real adapters (including the advisor filter and the two-step inventory
//! refresh).

pub mod fixtures;
pub mod helpers;
pub mod memory;

pub use helpers::{start_test_server, ApiTestClient, TestBackend};

/// Initialize test logging (call once per test binary).
pub fn init_test_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,stratus_tests=debug")),
        )
        .with_test_writer()
        .try_init();
}
