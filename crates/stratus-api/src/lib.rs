//! HTTP API server for Stratus.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod slots;
pub mod state;
