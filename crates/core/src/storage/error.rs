use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("{0}")]
    NotConfigured(String),
}

impl RepositoryError {
    /// Stable, machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            RepositoryError::NotFound { .. } => "not_found",
            RepositoryError::AlreadyExists { .. } => "already_exists",
            RepositoryError::ConnectionFailed(_) => "connection_failed",
            RepositoryError::QueryFailed(_) => "query_failed",
            RepositoryError::Serialization(_) => "serialization",
            RepositoryError::InvalidData(_) => "invalid_data",
            RepositoryError::NotConfigured(_) => "not_configured",
        }
    }

    /// The store's own message, without the variant prefix of `Display`.
    ///
    /// Row-level variants have no underlying message and fall back to `Display`.
    pub fn message(&self) -> String {
        match self {
            RepositoryError::ConnectionFailed(msg)
            | RepositoryError::QueryFailed(msg)
            | RepositoryError::Serialization(msg)
            | RepositoryError::InvalidData(msg)
            | RepositoryError::NotConfigured(msg) => msg.clone(),
            RepositoryError::NotFound { .. } | RepositoryError::AlreadyExists { .. } => {
                self.to_string()
            }
        }
    }

    /// Returns true if the store rejected a write because of a unique constraint.
    pub fn is_conflict(&self) -> bool {
        matches!(self, RepositoryError::AlreadyExists { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Postgres error code for `unique_violation`.
pub const UNIQUE_VIOLATION_CODE: &str = "23505";

/// Decides whether a store error describes a unique-constraint violation.
///
/// Managed stores are not consistent about how they surface this, so both
/// the SQLSTATE code and the message text are inspected.
pub fn is_unique_violation(code: Option<&str>, message: &str) -> bool {
    code == Some(UNIQUE_VIOLATION_CODE)
        || message.contains("duplicate key")
        || message.contains("unique constraint")
}
