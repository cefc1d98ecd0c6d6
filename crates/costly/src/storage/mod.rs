//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `WaitlistRepository`
//! trait defined in `costly_core::storage`. The implementation is selected at
//! compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): process-local storage, for development and tests
//! - `sqlite`: SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//! - `postgrest`: managed Postgres store reached over its PostgREST interface
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build against the managed store:
//! ```bash
//! cargo build -p costly --no-default-features --features postgrest
//! ```

#[cfg(all(feature = "sqlite", feature = "postgrest"))]
compile_error!("Cannot enable both 'sqlite' and 'postgrest' storage features");

#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!("Cannot enable both 'sqlite' and 'inmemory' storage features");

#[cfg(all(feature = "postgrest", feature = "inmemory"))]
compile_error!("Cannot enable both 'postgrest' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "sqlite", feature = "postgrest")))]
compile_error!("Must enable exactly one storage feature: 'inmemory', 'sqlite', or 'postgrest'");

// Handler tests run against the in-memory backend whatever feature is active.
#[cfg(any(feature = "inmemory", test))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgrest")]
pub mod postgrest;

#[cfg(any(feature = "inmemory", test))]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;

#[cfg(feature = "postgrest")]
pub use postgrest::PostgrestRepository;
