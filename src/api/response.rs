use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::storage::StoreError;
use crate::uploads::UploadError;

// ============================================================================
// Error envelope
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStatus {
    Error,
    Fail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub status: ErrorStatus,
}

// ============================================================================
// Unified error type for handlers
// ============================================================================

/// Either a fail (4xx) or an error (5xx), rendered as an [`ErrorBody`].
#[derive(Debug)]
pub enum ApiError {
    Fail(StatusCode, String),
    Error(StatusCode, String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (code, body) = match self {
            ApiError::Fail(code, message) => (
                code,
                ErrorBody {
                    message,
                    status: ErrorStatus::Fail,
                },
            ),
            ApiError::Error(code, message) => (
                code,
                ErrorBody {
                    message,
                    status: ErrorStatus::Error,
                },
            ),
        };
        (code, Json(body)).into_response()
    }
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::Fail(StatusCode::NOT_FOUND, message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Error(StatusCode::INTERNAL_SERVER_ERROR, message.into())
    }
}

// Every adapter failure is a 500; callers cannot tell causes apart by status.

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        tracing::error!(error = %e, "Storage operation failed");
        ApiError::internal(e.to_string())
    }
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        tracing::error!(error = %e, "Attachment upload failed");
        ApiError::internal(e.to_string())
    }
}

/// Why a request body could not be turned into a submission.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Invalid multipart data: {0}")]
    Multipart(String),
    #[error("Invalid form body: {0}")]
    Form(String),
    #[error("Invalid JSON body: {0}")]
    Json(String),
    #[error("Unsupported value for field '{0}': expected text or number")]
    UnsupportedValue(String),
}

impl From<FormError> for ApiError {
    fn from(e: FormError) -> Self {
        tracing::error!(error = %e, "Failed to parse submission");
        ApiError::internal(e.to_string())
    }
}
