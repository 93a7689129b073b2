//! AWS client wrappers for Stratus.
//!
//! One thin client per concern, all hanging off a shared SDK config built
//! once at startup. No retry or backoff logic beyond what the SDK does
//! implicitly, and no caching here; freshness is the cache policy's job.

pub mod client;
pub mod session;
pub mod tags;

pub use client::AwsClient;
pub use session::{load_sdk_config, AwsSettings};
