//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use costly_core::storage::{RepositoryError, Result, WaitlistRepository};
use costly_core::waitlist::WaitlistEntry;

const ENTITY_TYPE: &str = "WaitlistEntry";

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, String>,
    /// Last id handed out. Ids are never reused, even after deletes.
    last_id: i64,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.rows
            .iter()
            .any(|(id, stored)| stored == email && Some(*id) != except)
    }
}

/// In-memory storage backend for development and testing.
///
/// Rows live in a `BTreeMap` wrapped in `Arc<RwLock<_>>`, so iteration is
/// already in id order. Emails are unique byte-for-byte, matching a plain
/// `UNIQUE` column. Data is lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with rows, keeping their ids.
    ///
    /// Useful for reproducing legacy data that predates input normalization.
    #[allow(dead_code)]
    pub fn with_entries(entries: impl IntoIterator<Item = WaitlistEntry>) -> Self {
        let mut table = Table::default();
        for entry in entries {
            table.last_id = table.last_id.max(entry.id);
            table.rows.insert(entry.id, entry.email);
        }

        Self {
            table: Arc::new(RwLock::new(table)),
        }
    }
}

#[async_trait]
impl WaitlistRepository for InMemoryRepository {
    async fn list_entries(&self) -> Result<Vec<WaitlistEntry>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .map(|(id, email)| WaitlistEntry::new(*id, email.clone()))
            .collect())
    }

    async fn insert_entry(&self, email: &str) -> Result<WaitlistEntry> {
        let mut table = self.table.write().await;
        if table.email_taken(email, None) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: ENTITY_TYPE,
                id: email.to_string(),
            });
        }

        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(id, email.to_string());

        Ok(WaitlistEntry::new(id, email))
    }

    async fn find_by_email_ilike(&self, email: &str) -> Result<Option<WaitlistEntry>> {
        let needle = email.to_lowercase();
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .find(|(_, stored)| stored.to_lowercase() == needle)
            .map(|(id, stored)| WaitlistEntry::new(*id, stored.clone())))
    }

    async fn update_email(&self, id: i64, email: &str) -> Result<()> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&id) {
            return Err(RepositoryError::NotFound {
                entity_type: ENTITY_TYPE,
                id: id.to_string(),
            });
        }
        if table.email_taken(email, Some(id)) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: ENTITY_TYPE,
                id: email.to_string(),
            });
        }

        table.rows.insert(id, email.to_string());
        Ok(())
    }

    async fn delete_entry(&self, id: i64) -> Result<()> {
        let mut table = self.table.write().await;
        if table.rows.remove(&id).is_none() {
            return Err(RepositoryError::NotFound {
                entity_type: ENTITY_TYPE,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn max_id(&self) -> Result<Option<i64>> {
        let table = self.table.read().await;
        Ok(table.rows.keys().next_back().copied())
    }
}
