use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use costly_core::storage::{repository_error_to_status_code, RepositoryError};
use costly_core::waitlist::{EmailError, ErrorResponse};

/// Error returned by every handler, rendered as `{ "error": ..., "details"?: ... }`.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse::new(message),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// A store failure reported as a 500. The store's message is passed
    /// through as-is and the error class goes under `details.kind`.
    pub fn store_failure(err: &RepositoryError) -> Self {
        let mut error = Self::internal(err.message());
        error.body = error.body.with_details(json!({
            "kind": err.kind(),
            "message": err.message(),
        }));
        error
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        let status = StatusCode::from_u16(repository_error_to_status_code(&err))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, err.message())
    }
}

impl From<EmailError> for AppError {
    fn from(err: EmailError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.body.error, "Request failed");
        }

        (self.status, Json(self.body)).into_response()
    }
}
