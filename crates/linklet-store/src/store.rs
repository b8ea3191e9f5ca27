use crate::error::StoreError;
use async_trait::async_trait;
use jiff::Timestamp;
use linklet_core::UrlKey;

type Result<T> = std::result::Result<T, StoreError>;

/// Parameters for storing a URL mapping.
#[derive(Debug, Clone)]
pub struct SetParams {
    /// The target URL to store. The store performs no format validation.
    pub url: String,
    /// Optional caller-supplied key; `None` or an empty string means a key
    /// is generated. Supplied keys land in the reserved namespace.
    pub key: Option<String>,
    /// When the record stops being retrievable; `None` means never.
    pub expire_time: Option<Timestamp>,
}

/// A URL-shortening record store.
///
/// Each operation is a single round-trip to the backing store (plus the
/// bounded collision retry on Set); there is no session state between
/// calls, so any number of tasks may invoke the operations concurrently.
#[async_trait]
pub trait UrlStore: Send + Sync + 'static {
    /// Stores a mapping and returns the final key: generated, or the
    /// supplied key in its marked storage form. New records always start
    /// at zero visits.
    async fn set(&self, params: SetParams) -> Result<UrlKey>;

    /// Returns the URL stored under `key`, if the record exists and has
    /// not expired.
    async fn get(&self, key: &str) -> Result<String>;

    /// Returns the visit count stored under `key`; same expiry filter as
    /// [`UrlStore::get`].
    async fn count(&self, key: &str) -> Result<u64>;

    /// Increments the visit counter by one. Expired records are still
    /// incremented; this path carries no expiry filter.
    async fn inc(&self, key: &str) -> Result<()>;
}
