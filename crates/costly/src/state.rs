//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. The waitlist store sits behind a repository trait object
//! whose backend is chosen by feature flag.

use std::sync::Arc;

use costly_core::storage::{RepositoryError, WaitlistRepository};

use crate::config::Config;

/// Message returned when the server was started without store credentials.
pub const STORE_NOT_CONFIGURED: &str = "Waitlist store configuration missing";

/// Shared application state.
///
/// This is cloned for each request handler. The repository is optional so
/// that a misconfigured deployment still starts and answers every waitlist
/// request with a clear error instead of crashing at boot.
#[derive(Clone)]
pub struct AppState {
    waitlist_repo: Option<Arc<dyn WaitlistRepository>>,
    /// Name of the waitlist table, used in operator instructions.
    pub waitlist_table: String,
}

impl AppState {
    /// Creates a new AppState around the given repository.
    fn build(waitlist_repo: Option<Arc<dyn WaitlistRepository>>, config: &Config) -> Self {
        Self {
            waitlist_repo,
            waitlist_table: config.waitlist_table.clone(),
        }
    }

    /// Creates an AppState around an explicit repository.
    #[allow(dead_code)]
    pub fn with_repository(waitlist_repo: Arc<dyn WaitlistRepository>, config: &Config) -> Self {
        Self::build(Some(waitlist_repo), config)
    }

    /// Creates an AppState with no store behind it.
    #[allow(dead_code)]
    pub fn unconfigured(config: &Config) -> Self {
        Self::build(None, config)
    }

    /// Get the waitlist repository, or the error every handler reports when
    /// the store is not configured.
    pub fn waitlist_repo(&self) -> Result<&Arc<dyn WaitlistRepository>, RepositoryError> {
        self.waitlist_repo
            .as_ref()
            .ok_or_else(|| RepositoryError::NotConfigured(STORE_NOT_CONFIGURED.to_string()))
    }
}

// ============================================================================
// Factory functions for the different storage backends
// ============================================================================

#[cfg(feature = "inmemory")]
mod inmemory {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage.
        /// Useful for local development without any external dependencies.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            tracing::warn!("Using in-memory waitlist storage; data is lost on restart");
            Ok(Self::build(
                Some(Arc::new(InMemoryRepository::new())),
                config,
            ))
        }
    }
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::*;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = SqliteRepository::new(&config.sqlite_path, &config.waitlist_table).await?;
            tracing::info!(path = %config.sqlite_path, "Opened SQLite waitlist store");
            Ok(Self::build(Some(Arc::new(sqlite_repo)), config))
        }
    }
}

#[cfg(feature = "postgrest")]
mod postgrest {
    use super::*;
    use crate::storage::PostgrestRepository;

    impl AppState {
        /// Creates AppState with the managed store.
        ///
        /// Missing credentials are not fatal: the server starts and every
        /// waitlist endpoint reports the missing configuration.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let Some(credentials) = config.store_credentials() else {
                tracing::error!(
                    "SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY must both be set; \
                     waitlist endpoints will fail until they are"
                );
                return Ok(Self::unconfigured(config));
            };

            let repo = PostgrestRepository::new(
                &credentials.url,
                &credentials.service_key,
                &config.waitlist_table,
                config.request_timeout(),
            )?;
            tracing::info!(url = %credentials.url, table = %config.waitlist_table, "Using managed waitlist store");

            Ok(Self::build(Some(Arc::new(repo)), config))
        }
    }
}

// ============================================================================
// Test support - provides Default implementation and repository doubles
// ============================================================================
