use aws_config::SdkConfig;
use aws_sdk_s3::Client;

/// Build an S3 client from an already-loaded configuration.
pub fn client_from_config(config: &SdkConfig) -> Client {
    Client::new(config)
}
