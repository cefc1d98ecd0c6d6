//! Client error types.

use thiserror::Error;

use costly_core::waitlist::ErrorResponse;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("This email is already on the waitlist!")]
    AlreadyOnWaitlist,

    #[error("Endpoint not found: {path}")]
    NotFound { path: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Extracts the human-readable message from an error response body.
///
/// The server answers `{ "error": ... }`; anything else is passed through.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => "Unknown error".to_string(),
    }
}
