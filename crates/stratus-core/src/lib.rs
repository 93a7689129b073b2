//! Stratus Core
//!
//! Core domain types, port traits, and error handling for Stratus.
//! This crate has minimal dependencies and defines the shared vocabulary
//! used across all other crates.

pub mod advisor;
pub mod cost;
pub mod diagram;
pub mod error;
pub mod ports;
pub mod presentation;
pub mod resource;

pub use error::{Error, Result};
