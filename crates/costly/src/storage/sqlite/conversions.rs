//! Row conversions for the SQLite backend.

use rusqlite::Row;

use costly_core::waitlist::WaitlistEntry;

/// Converts a `SELECT id, email` row into a domain entry.
pub fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<WaitlistEntry> {
    Ok(WaitlistEntry {
        id: row.get(0)?,
        email: row.get(1)?,
    })
}
