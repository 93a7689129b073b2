//! HTTP request handlers.

pub mod advisor;
pub mod agent;
pub mod analysis;
pub mod auth;
pub mod costs;
pub mod diagrams;
pub mod health;
pub mod images;
pub mod presentation;
pub mod resources;
pub mod tags;
