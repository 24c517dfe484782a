//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Serialize;
use todo_storage::{comment::CommentStorageError, todo::TodoStorageError};

use crate::{attachment_storage::AttachmentError, todo_service::TodoServiceError};

/// API error response envelope
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Whether the client should retry the request
    pub allow_retry: bool,
    /// Error details
    error: ErrorBody,
}

/// Error body containing code and message
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    /// Machine-readable error code
    pub code: &'static str,
    /// Human-readable error message
    pub message: &'static str,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub const fn new(
        status: StatusCode,
        code: &'static str,
        msg: &'static str,
        retry: bool,
    ) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                allow_retry: retry,
                error: ErrorBody { code, message: msg },
            },
        }
    }

    /// HTTP status code of the error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.inner.error.code
    }

    const fn internal(retry: bool) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Internal server error",
            retry,
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!(
                "Client error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            500..=599 => tracing::error!(
                "Server error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert todo storage errors to application errors
impl From<TodoStorageError> for AppError {
    fn from(err: TodoStorageError) -> Self {
        match err {
            TodoStorageError::NotFound => Self::new(
                StatusCode::NOT_FOUND,
                "not_found",
                "Todo not found",
                false,
            ),
            TodoStorageError::SerializationError(msg) => {
                tracing::error!("Todo serialization error: {msg}");
                Self::internal(false)
            }
            err => {
                tracing::error!("DynamoDB error: {err}");
                Self::internal(true)
            }
        }
    }
}

/// Convert comment storage errors to application errors
impl From<CommentStorageError> for AppError {
    fn from(err: CommentStorageError) -> Self {
        match err {
            CommentStorageError::SerializationError(msg) => {
                tracing::error!("Comment serialization error: {msg}");
                Self::internal(false)
            }
            err => {
                tracing::error!("DynamoDB error: {err}");
                Self::internal(true)
            }
        }
    }
}

/// Convert attachment errors to application errors
impl From<AttachmentError> for AppError {
    fn from(err: AttachmentError) -> Self {
        match err {
            AttachmentError::ConfigError(msg) => {
                tracing::error!("Configuration error: {msg}");
                Self::internal(false)
            }
            AttachmentError::PresignError(msg) => {
                tracing::error!("S3 presign error: {msg}");
                Self::internal(true)
            }
        }
    }
}

impl From<TodoServiceError> for AppError {
    fn from(err: TodoServiceError) -> Self {
        match err {
            TodoServiceError::Todo(err) => err.into(),
            TodoServiceError::Comment(err) => err.into(),
            TodoServiceError::Attachment(err) => err.into(),
        }
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}
