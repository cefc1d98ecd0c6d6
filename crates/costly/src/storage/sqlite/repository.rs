//! SQLite repository implementation.
//!
//! Implements `WaitlistRepository` from `costly_core::storage` using SQLite.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use costly_core::storage::{RepositoryError, Result, WaitlistRepository};
use costly_core::waitlist::WaitlistEntry;

use super::conversions::row_to_entry;
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id, ENTITY_TYPE};
use super::schema::Statements;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
pub struct SqliteRepository {
    conn: Connection,
    sql: Arc<Statements>,
}

impl SqliteRepository {
    /// Creates a new repository storing `table` in a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str, table: &str) -> Result<Self> {
        let sql = Statements::for_table(table)?;
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::open(conn, sql).await
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Data is lost when the connection is dropped.
    #[cfg(test)]
    pub async fn new_in_memory(table: &str) -> Result<Self> {
        let sql = Statements::for_table(table)?;
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::open(conn, sql).await
    }

    /// Creates the schema and wraps the connection.
    async fn open(conn: Connection, sql: Statements) -> Result<Self> {
        let create_tables = sql.create_tables.clone();
        conn.call(move |conn| {
            conn.execute_batch(&create_tables).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(Self {
            conn,
            sql: Arc::new(sql),
        })
    }
}

#[async_trait]
impl WaitlistRepository for SqliteRepository {
    async fn list_entries(&self) -> Result<Vec<WaitlistEntry>> {
        let sql = Arc::clone(&self.sql);

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql.select_all_entries).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_entry).map_err(wrap_err)?;

                let mut entries = Vec::new();
                for row_result in rows {
                    entries.push(row_result.map_err(wrap_err)?);
                }
                Ok(entries)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn insert_entry(&self, email: &str) -> Result<WaitlistEntry> {
        let sql = Arc::clone(&self.sql);
        let email = email.to_string();
        let email_for_err = email.clone();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql.insert_entry).map_err(wrap_err)?;
                let entry = stmt.query_row([&email], row_to_entry).map_err(wrap_err)?;
                Ok(entry)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, email_for_err))
    }

    async fn find_by_email_ilike(&self, email: &str) -> Result<Option<WaitlistEntry>> {
        let sql = Arc::clone(&self.sql);
        let email = email.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(&sql.select_entry_by_email_nocase)
                    .map_err(wrap_err)?;
                match stmt.query_row([&email], row_to_entry) {
                    Ok(entry) => Ok(Some(entry)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn update_email(&self, id: i64, email: &str) -> Result<()> {
        let sql = Arc::clone(&self.sql);
        let email = email.to_string();
        let email_for_err = email.clone();

        let changed = self
            .conn
            .call(move |conn| {
                conn.execute(&sql.update_entry_email, rusqlite::params![id, email])
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, email_for_err))?;

        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity_type: ENTITY_TYPE,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete_entry(&self, id: i64) -> Result<()> {
        let sql = Arc::clone(&self.sql);

        let changed = self
            .conn
            .call(move |conn| conn.execute(&sql.delete_entry, [id]).map_err(wrap_err))
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, id.to_string()))?;

        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity_type: ENTITY_TYPE,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn max_id(&self) -> Result<Option<i64>> {
        let sql = Arc::clone(&self.sql);

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql.select_max_id).map_err(wrap_err)?;
                match stmt.query_row([], |row| row.get::<_, i64>(0)) {
                    Ok(id) => Ok(Some(id)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }
}
