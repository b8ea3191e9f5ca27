use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored URL record, the sole persisted entity of the store.
///
/// A record is created exactly once and never deleted; expiration is a
/// read-time filter. Only `count` is mutated after creation, and only by
/// the Inc operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// Record key in storage form (reserved keys carry the `$` marker).
    pub key: String,
    /// The target address. The store performs no format validation.
    pub url: String,
    /// When the record stops being retrievable; `None` means never.
    pub expire_time: Option<Timestamp>,
    /// Visit counter, starts at zero and only ever grows.
    pub count: u64,
}

impl UrlRecord {
    /// Creates a fresh record with a zero visit count.
    pub fn new(
        key: impl Into<String>,
        url: impl Into<String>,
        expire_time: Option<Timestamp>,
    ) -> Self {
        Self {
            key: key.into(),
            url: url.into(),
            expire_time,
            count: 0,
        }
    }

    /// Whether the record passes the expiry filter at `now`.
    ///
    /// The expiry instant itself is still considered valid.
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.expire_time.map_or(true, |expire_time| expire_time >= now)
    }
}
