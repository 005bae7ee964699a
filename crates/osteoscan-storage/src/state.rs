use aws_sdk_s3::Client;
use serde::{Serialize, de::DeserializeOwned};

use osteoscan_core::s3_keys;

use crate::error::StorageError;
use crate::objects;

/// Load one JSON record from S3.
pub async fn load_json<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<T, StorageError> {
    let body = objects::get_object(client, bucket, key).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Save one JSON record to S3, overwriting.
pub async fn save_json<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    objects::put_object(client, bucket, key, body, Some("application/json")).await
}

/// Save a new JSON record, failing if the key is already taken.
pub async fn create_json<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    objects::put_object_if_absent(client, bucket, key, body, Some("application/json")).await
}

/// Load every JSON record under `prefix`.
///
/// Records that fail to parse are skipped with a warning so one corrupt
/// object cannot take a listing down.
pub async fn load_all<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<T>, StorageError> {
    let keys = objects::list_objects(client, bucket, prefix).await?;

    let mut records = Vec::with_capacity(keys.len());
    for key in keys.iter().filter(|k| s3_keys::is_record_key(k)) {
        let body = objects::get_object(client, bucket, key).await?;
        match serde_json::from_slice::<T>(&body) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!(key = %key, error = %e, "skipping unreadable record"),
        }
    }
    Ok(records)
}
