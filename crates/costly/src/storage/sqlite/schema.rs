//! SQLite schema definitions and SQL statements.
//!
//! Pure data, no I/O. The table name comes from configuration, so every
//! statement is rendered once for that table when the repository opens.

use costly_core::storage::RepositoryError;

/// Checks that `table` is a plain SQL identifier: ASCII letters, digits and
/// underscores, not starting with a digit.
pub fn is_valid_table_name(table: &str) -> bool {
    let mut chars = table.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Every statement the repository runs, rendered for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statements {
    /// `AUTOINCREMENT` keeps SQLite from reusing the ids of deleted rows,
    /// which the count endpoint relies on.
    pub create_tables: String,
    pub select_all_entries: String,
    pub insert_entry: String,
    pub select_entry_by_email_nocase: String,
    pub update_entry_email: String,
    pub delete_entry: String,
    pub select_max_id: String,
}

impl Statements {
    pub fn for_table(table: &str) -> Result<Self, RepositoryError> {
        if !is_valid_table_name(table) {
            return Err(RepositoryError::NotConfigured(format!(
                "Invalid waitlist table name: {table:?}"
            )));
        }

        Ok(Self {
            create_tables: format!(
                r#"
CREATE TABLE IF NOT EXISTS "{table}" (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#
            ),
            select_all_entries: format!(
                r#"
SELECT id, email
FROM "{table}"
ORDER BY id ASC
"#
            ),
            insert_entry: format!(
                r#"
INSERT INTO "{table}" (email)
VALUES (?1)
RETURNING id, email
"#
            ),
            select_entry_by_email_nocase: format!(
                r#"
SELECT id, email
FROM "{table}"
WHERE email = ?1 COLLATE NOCASE
ORDER BY id ASC
LIMIT 1
"#
            ),
            update_entry_email: format!(
                r#"
UPDATE "{table}"
SET email = ?2
WHERE id = ?1
"#
            ),
            delete_entry: format!(
                r#"
DELETE FROM "{table}"
WHERE id = ?1
"#
            ),
            select_max_id: format!(
                r#"
SELECT id
FROM "{table}"
ORDER BY id DESC
LIMIT 1
"#
            ),
        })
    }
}
