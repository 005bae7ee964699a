use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use osteoscan_bedrock::BedrockError;
use osteoscan_core::error::CoreError;
use osteoscan_scoring::ValidationError;
use osteoscan_storage::StorageError;

/// A failure of one of the external collaborators. Surfaced to the user for
/// manual resubmission; never retried automatically.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("image upload failed: {0}")]
    Upload(String),

    #[error("analysis invocation failed: {0}")]
    Invocation(String),

    #[error("analysis timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("malformed analysis response: {0}")]
    MalformedResponse(String),
}

impl From<BedrockError> for UpstreamError {
    fn from(e: BedrockError) -> Self {
        match e {
            BedrockError::Invocation(_) => UpstreamError::Invocation(e.to_string()),
            BedrockError::ResponseParse(_)
            | BedrockError::SchemaViolation(_)
            | BedrockError::Serialization(_) => UpstreamError::MalformedResponse(e.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum IntakeError {
    /// Bad patient or upload input. Nothing was stored.
    #[error("invalid input: {0}")]
    Input(#[from] CoreError),

    /// Submission or status change refused. Nothing was stored.
    #[error(transparent)]
    Rejected(ValidationError),

    #[error(transparent)]
    Upload(UpstreamError),

    /// The model call failed; the record was stored as failed.
    #[error("analysis {record_id} failed: {source}")]
    Upstream {
        record_id: Uuid,
        source: UpstreamError,
    },

    /// The model reply failed a hard check; the record was stored as failed.
    #[error("analysis {record_id} failed validation: {source}")]
    Validation {
        record_id: Uuid,
        source: ValidationError,
    },

    #[error(transparent)]
    Store(#[from] StorageError),
}

impl IntakeError {
    /// The stored record a failure refers to, if one was written.
    pub fn record_id(&self) -> Option<Uuid> {
        match self {
            IntakeError::Upstream { record_id, .. } | IntakeError::Validation { record_id, .. } => {
                Some(*record_id)
            }
            _ => None,
        }
    }
}
