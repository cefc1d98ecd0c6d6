use serde::{Deserialize, Serialize};

/// Response body of `POST /waitlist-fix-sequence`.
///
/// The service never runs DDL against the managed store; it reports what
/// the id sequence should be reset to and how an operator can do it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceResponse {
    pub success: bool,
    pub message: String,
    pub max_id: i64,
    pub next_id: i64,
    pub instructions: Vec<String>,
}

impl SequenceResponse {
    /// Builds the report for a table whose highest id is `max_id`.
    pub fn for_max_id(table: &str, max_id: i64) -> Self {
        let next_id = max_id.saturating_add(1);
        Self {
            success: true,
            message: "Sequence reset needed".to_string(),
            max_id,
            next_id,
            instructions: vec![
                "Open the SQL editor of the managed database dashboard".to_string(),
                format!("Run: {}", setval_statement(table, next_id)),
                "This will reset the ID sequence to prevent conflicts".to_string(),
            ],
        }
    }
}

/// The Postgres statement that moves `<table>_id_seq` to `next_id`.
pub fn setval_statement(table: &str, next_id: i64) -> String {
    format!("SELECT setval('{table}_id_seq', {next_id}, false);")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_response_for_max_id() {
        let response = SequenceResponse::for_max_id("waitlist", 41);

        assert!(response.success);
        assert_eq!(response.max_id, 41);
        assert_eq!(response.next_id, 42);
        assert_eq!(
            response.instructions[1],
            "Run: SELECT setval('waitlist_id_seq', 42, false);"
        );
    }

    #[test]
    fn test_sequence_response_empty_table() {
        let response = SequenceResponse::for_max_id("waitlist", 0);
        assert_eq!(response.next_id, 1);
    }

    #[test]
    fn test_sequence_response_camel_case() {
        let json = serde_json::to_value(SequenceResponse::for_max_id("waitlist", 3)).unwrap();
        assert_eq!(json["maxId"], 3);
        assert_eq!(json["nextId"], 4);
    }
}
