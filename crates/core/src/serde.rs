//! Serde helper functions for untrusted JSON payloads and store rows.
//!
//! Request bodies come straight from browsers, and rows come from a store
//! whose `email` column may hold `null`. These helpers absorb both quirks at
//! the deserialization boundary so the rest of the crate works with plain
//! strings.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize any JSON value into an optional string.
///
/// Only non-empty JSON strings survive. Numbers, booleans, objects, arrays,
/// `null` and `""` all become `None`, so a handler can treat them alike as
/// "no usable value".
pub fn deserialize_string_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}

/// Deserialize a nullable string column, treating `null` as an empty string.
pub fn deserialize_null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.unwrap_or_default())
}
