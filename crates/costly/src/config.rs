use std::{env, time::Duration};

/// Connection details for the managed waitlist store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCredentials {
    pub url: String,
    pub service_key: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the managed store (`SUPABASE_URL`, falling back to `NEXT_PUBLIC_SUPABASE_URL`)
    pub store_url: Option<String>,
    /// Privileged key for the managed store (`SUPABASE_SERVICE_ROLE_KEY`)
    pub service_key: Option<String>,
    /// Name of the waitlist table (default: "waitlist")
    pub waitlist_table: String,
    /// Path to SQLite database file (default: "costly.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SUPABASE_URL` / `NEXT_PUBLIC_SUPABASE_URL` - Managed store base URL
    /// - `SUPABASE_SERVICE_ROLE_KEY` - Managed store service key
    /// - `WAITLIST_TABLE` - Waitlist table name (default: "waitlist")
    /// - `SQLITE_PATH` - SQLite database path (default: "costly.db")
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Blank values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            store_url: var("SUPABASE_URL").or_else(|| var("NEXT_PUBLIC_SUPABASE_URL")),
            service_key: var("SUPABASE_SERVICE_ROLE_KEY"),
            waitlist_table: var("WAITLIST_TABLE").unwrap_or_else(|| "waitlist".to_string()),
            sqlite_path: var("SQLITE_PATH").unwrap_or_else(|| "costly.db".to_string()),
            request_timeout_seconds: var("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Returns the managed store credentials when both halves are present.
    #[allow(dead_code)]
    pub fn store_credentials(&self) -> Option<StoreCredentials> {
        match (&self.store_url, &self.service_key) {
            (Some(url), Some(service_key)) => Some(StoreCredentials {
                url: url.clone(),
                service_key: service_key.clone(),
            }),
            _ => None,
        }
    }
}
