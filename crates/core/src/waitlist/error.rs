use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when accepting an email from a client.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email is required")]
    Missing,
    #[error("Invalid email format")]
    InvalidFormat,
}

/// Why a stored row cannot take part in deduplication.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidReason {
    #[error("Empty email")]
    #[serde(rename = "Empty email")]
    Empty,
    #[error("Invalid format")]
    #[serde(rename = "Invalid format")]
    InvalidFormat,
}
