use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use osteoscan_export::ExportError;
use osteoscan_intake::IntakeError;
use osteoscan_scoring::ValidationError;
use osteoscan_storage::StorageError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    /// The model reply failed a hard check; the failed record is kept.
    Unprocessable { message: String, record_id: Option<Uuid> },
    /// An upstream collaborator failed; resubmit manually.
    BadGateway { message: String, record_id: Option<Uuid> },
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    record_id: Option<Uuid>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, record_id) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::Unprocessable { message, record_id } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message, record_id)
            }
            ApiError::BadGateway { message, record_id } => {
                (StatusCode::BAD_GATEWAY, message, record_id)
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    None,
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                error: message,
                record_id,
            }),
        )
            .into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => {
                ApiError::NotFound(format!("object not found: {key}"))
            }
            StorageError::DuplicateMrn { .. } | StorageError::AlreadyExists { .. } => {
                ApiError::Conflict(e.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::InvalidSubmission { .. } => ApiError::BadRequest(e.to_string()),
            ValidationError::InvalidTransition { .. } => ApiError::Conflict(e.to_string()),
            other => ApiError::Unprocessable {
                message: other.to_string(),
                record_id: None,
            },
        }
    }
}

impl From<IntakeError> for ApiError {
    fn from(e: IntakeError) -> Self {
        let record_id = e.record_id();
        match e {
            IntakeError::Input(inner) => ApiError::BadRequest(inner.to_string()),
            IntakeError::Rejected(inner) => inner.into(),
            IntakeError::Upload(inner) => ApiError::BadGateway {
                message: inner.to_string(),
                record_id: None,
            },
            e @ IntakeError::Upstream { .. } => ApiError::BadGateway {
                message: e.to_string(),
                record_id,
            },
            e @ IntakeError::Validation { .. } => ApiError::Unprocessable {
                message: e.to_string(),
                record_id,
            },
            IntakeError::Store(inner) => inner.into(),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::NotReportable(_) => ApiError::Conflict(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
