//! API request and response types for the waitlist endpoints.
//!
//! These types are shared between the server and client for type-safe API communication.
//! Following the Functional Core pattern, these are pure data types with no I/O.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serde::deserialize_string_only;

use super::types::WaitlistEntry;

/// Request payload for `POST /waitlist-join`.
///
/// `email` is `None` when the client sent nothing usable: no field, an
/// empty string, or a value that is not a string at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JoinRequest {
    #[serde(
        default,
        deserialize_with = "deserialize_string_only",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
}

impl JoinRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
        }
    }
}

/// Response body of a successful join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<WaitlistEntry>,
}

impl JoinResponse {
    pub fn added(entry: WaitlistEntry) -> Self {
        Self {
            success: true,
            message: "Email added to waitlist".to_string(),
            data: vec![entry],
        }
    }
}

/// Response body of `GET /waitlist-count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: i64,
}

/// Seconds a client should wait before retrying `GET /503`.
pub const RETRY_AFTER_SECONDS: u32 = 3600;

/// Static body of `GET /503`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceUnavailableResponse {
    pub error: String,
    pub message: String,
    pub status: u16,
}

impl Default for ServiceUnavailableResponse {
    fn default() -> Self {
        Self {
            error: "Service Unavailable".to_string(),
            message: "This service is temporarily unavailable. Please check back later."
                .to_string(),
            status: 503,
        }
    }
}

/// Readiness probe body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// JSON error body shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}
