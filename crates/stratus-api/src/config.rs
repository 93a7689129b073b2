//! Server configuration resolved from the environment.

use stratus_core::{Error, Result};

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub aws_region: String,
    pub openai_api_key: String,
    pub gemini_api_key: String,
}

impl AppConfig {
    /// Resolve configuration from environment variables. `DATABASE_URL` is
    /// mandatory; everything else has a usable default. API keys may be
    /// empty, in which case the agent endpoints fail upstream rather than
    /// at startup.
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| Error::Internal("DATABASE_URL must be set".to_string()))?;

        Ok(Self {
            database_url,
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            aws_region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            openai_api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
        })
    }
}
