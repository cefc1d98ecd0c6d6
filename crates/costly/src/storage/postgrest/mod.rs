//! Managed Postgres storage backend, reached over its PostgREST interface.
//!
//! Every repository call is a single HTTP request against
//! `{url}/rest/v1/{table}`, authenticated with the service role key.

mod error;
mod repository;

pub use repository::PostgrestRepository;
