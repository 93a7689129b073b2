//! Error types for Stratus.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Upstream provider errors (AWS APIs, LLM APIs). Both fetch-side and
    // provider-side failures collapse into this one kind; handlers do not
    // distinguish "source unavailable" from "provider rejected us".
    #[error("{0}")]
    Upstream(String),

    #[error("AWS credential validation failed: {0}")]
    CredentialValidation(String),

    // Model produced output we could not interpret (non-JSON where JSON was
    // expected, missing required keys, unknown enum values).
    #[error("Malformed model output: {0}")]
    MalformedResponse(String),

    // Entity lookups
    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
