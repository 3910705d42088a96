/// Error handling for the API server
///
/// Every handler returns `Result<T, ApiError>`. The error converts into the
/// standard response envelope with `status: "error"` and a status code
/// fixed per error kind:
///
/// | Error | Status |
/// |---|---|
/// | `BadRequest` | 400 |
/// | `InvalidData` | 400 |
/// | `NotFound` | 404 |
/// | `InternalError` | 500 |
///
/// Internal error details are logged and never sent to the client.
///
/// # Example
///
/// ```
/// use feedbox_api::error::{ApiError, ApiResult};
///
/// fn parse_estimate(raw: &str) -> ApiResult<i32> {
///     raw.parse()
///         .map_err(|_| ApiError::BadRequest("estimate must be a number".to_string()))
/// }
///
/// assert!(parse_estimate("abc").is_err());
/// ```

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use feedbox_shared::storage::StorageError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request could not be decoded (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request decoded but its data failed validation (400)
    #[error("Invalid data: {message}")]
    InvalidData {
        message: String,
        details: Vec<ValidationErrorDetail>,
    },

    /// Not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always "error"
    pub status: String,

    /// Human-readable error message
    pub error: String,

    /// Per-field validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidData { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (message, details) = match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => (msg, None),
            ApiError::InvalidData { message, details } => (message, Some(details)),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                ("internal error".to_string(), None)
            }
        };

        let body = Json(ErrorResponse {
            status: "error".to_string(),
            error: message,
            details,
        });

        (status, body).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidData { entity, errors } => {
                let mut details: Vec<ValidationErrorDetail> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |error| ValidationErrorDetail {
                            field: field.to_string(),
                            message: error
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| error.code.to_string()),
                        })
                    })
                    .collect();
                details.sort_by(|a, b| a.field.cmp(&b.field));

                ApiError::InvalidData {
                    message: format!("invalid {} data", entity),
                    details,
                }
            }
            StorageError::NotFound { entity, .. } => ApiError::NotFound(format!("{} not found", entity)),
            backend @ StorageError::Backend { .. } => ApiError::InternalError(backend.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        ApiError::BadRequest("failed to decode request".to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected path parameter");
        ApiError::BadRequest("failed to decode request".to_string())
    }
}
