use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("unsupported image format: {0}")]
    UnsupportedImageFormat(String),

    #[error("invalid uuid: {0}")]
    InvalidUuid(#[from] uuid::Error),
}

impl CoreError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
