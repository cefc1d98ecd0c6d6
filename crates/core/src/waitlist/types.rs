use serde::{Deserialize, Serialize};

use crate::serde::deserialize_null_as_empty;

/// A single signup row in the `waitlist` table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaitlistEntry {
    /// Identifier assigned by the store. Monotonic, never reused.
    pub id: i64,
    /// The email exactly as stored. May not be in canonical form for rows
    /// that predate normalization.
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub email: String,
}

impl WaitlistEntry {
    /// Creates an entry from an id and a stored email.
    pub fn new(id: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_ignores_extra_columns() {
        let json = r#"{"id": 3, "email": "a@b.com", "created_at": "2025-01-01T00:00:00Z"}"#;
        let entry: WaitlistEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry, WaitlistEntry::new(3, "a@b.com"));
    }

    #[test]
    fn test_entry_null_email_reads_as_empty() {
        let entry: WaitlistEntry = serde_json::from_str(r#"{"id": 9, "email": null}"#).unwrap();
        assert_eq!(entry.email, "");
    }
}
