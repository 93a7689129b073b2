//! Shared AWS session configuration.

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Region settings resolved from the environment at startup. Credentials
/// come from the SDK's default provider chain (environment variables,
/// shared config, instance metadata).
#[derive(Debug, Clone)]
pub struct AwsSettings {
    pub region: String,
}

impl Default for AwsSettings {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
        }
    }
}

/// Build the process-wide SDK config. Initialized once and shared read-only
/// by every client.
pub async fn load_sdk_config(settings: &AwsSettings) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()))
        .load()
        .await
}
