//! PostgREST error mapping.
//!
//! Failed requests come back as a JSON body shaped like
//! `{"code": "23505", "message": "...", "details": "...", "hint": null}`.
//! Those are mapped to `RepositoryError` from `costly_core::storage`.

use reqwest::StatusCode;
use serde::Deserialize;

use costly_core::storage::{is_unique_violation, RepositoryError};

pub const ENTITY_TYPE: &str = "WaitlistEntry";

/// Error body returned by PostgREST.
#[derive(Debug, Default, Deserialize)]
pub struct PostgrestErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// Maps a non-success response to a RepositoryError.
///
/// # Error Mapping
///
/// - unique violation (`23505` or matching message) → `AlreadyExists`
/// - `401` / `403` → `ConnectionFailed` (the store refused our key)
/// - All other errors → `QueryFailed`
pub fn map_error_response(status: StatusCode, body: &str, id: &str) -> RepositoryError {
    let parsed: PostgrestErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = match parsed.message {
        Some(message) if !message.is_empty() => message,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => format!("HTTP {status}"),
    };

    if is_unique_violation(parsed.code.as_deref(), &message) {
        return RepositoryError::AlreadyExists {
            entity_type: ENTITY_TYPE,
            id: id.to_string(),
        };
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            RepositoryError::ConnectionFailed(message)
        }
        _ => match parsed.details {
            Some(details) if !details.is_empty() => {
                RepositoryError::QueryFailed(format!("{message} ({details})"))
            }
            _ => RepositoryError::QueryFailed(message),
        },
    }
}

/// Maps a transport-level reqwest failure to a RepositoryError.
pub fn map_transport_error(err: reqwest::Error) -> RepositoryError {
    if err.is_connect() || err.is_timeout() {
        RepositoryError::ConnectionFailed(err.to_string())
    } else if err.is_decode() {
        RepositoryError::Serialization(err.to_string())
    } else {
        RepositoryError::QueryFailed(err.to_string())
    }
}
