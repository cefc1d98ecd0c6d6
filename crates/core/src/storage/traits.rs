use async_trait::async_trait;

use crate::waitlist::WaitlistEntry;

use super::Result;

/// Repository for the `waitlist` table.
///
/// Every method maps onto a single call against the backing store; none of
/// them retry, and none of them are transactional with each other.
#[async_trait]
pub trait WaitlistRepository: Send + Sync {
    /// Gets every row, ordered by id ascending.
    async fn list_entries(&self) -> Result<Vec<WaitlistEntry>>;

    /// Inserts a row with the given email and returns it with its assigned id.
    ///
    /// A unique-constraint violation is reported as
    /// [`RepositoryError::AlreadyExists`](super::RepositoryError::AlreadyExists).
    async fn insert_entry(&self, email: &str) -> Result<WaitlistEntry>;

    /// Gets the first row whose email matches case-insensitively.
    async fn find_by_email_ilike(&self, email: &str) -> Result<Option<WaitlistEntry>>;

    /// Rewrites the email of an existing row.
    async fn update_email(&self, id: i64, email: &str) -> Result<()>;

    /// Deletes a row by its id.
    async fn delete_entry(&self, id: i64) -> Result<()>;

    /// Gets the highest id ever assigned to a live row, if any.
    async fn max_id(&self) -> Result<Option<i64>>;
}
