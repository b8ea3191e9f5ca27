use crate::error::Result;
use crate::record::UrlRecord;
use async_trait::async_trait;
use jiff::Timestamp;

/// The narrow contract the store needs from a document database.
///
/// Implementations provide single-document atomicity only: a uniqueness
/// constraint on the key column, an expiry-filtered point lookup, and an
/// atomic counter increment. No multi-document transactions are assumed.
#[async_trait]
pub trait UrlCollection: Send + Sync + 'static {
    /// Inserts a new record.
    /// Returns `Err(Conflict)` if the key is already taken.
    async fn insert_unique(&self, record: UrlRecord) -> Result<()>;

    /// Finds the record for `key` that passes the expiry filter at `now`:
    /// `expire_time` absent, or `expire_time >= now`.
    async fn find_active(&self, key: &str, now: Timestamp) -> Result<Option<UrlRecord>>;

    /// Atomically increments the record's visit counter by one. Expired
    /// records are incremented too; this path carries no expiry filter.
    /// Returns `Err(NotFound)` if the key does not exist.
    async fn increment_count(&self, key: &str) -> Result<()>;
}
