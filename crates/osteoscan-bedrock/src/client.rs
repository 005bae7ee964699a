use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_bedrockruntime::Client;

/// Load the shared AWS configuration from the environment.
pub async fn load_config() -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest()).load().await
}

/// Build a Bedrock runtime client from an already-loaded configuration.
pub fn build_client(config: &SdkConfig) -> Client {
    Client::new(config)
}
