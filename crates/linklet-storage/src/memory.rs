use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::Timestamp;
use linklet_core::error::{Result, StorageError};
use linklet_core::{UrlCollection, UrlRecord};

/// In-memory implementation of [`UrlCollection`] using DashMap.
///
/// DashMap's sharded locks give each operation single-document atomicity:
/// inserts go through the entry API so an occupied key is reported as a
/// conflict, and increments mutate the record under its shard lock.
///
/// Expired records are kept; expiry is a read-time filter, never a delete,
/// so an expired key stays taken and its counter stays incrementable.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCollection {
    records: DashMap<String, UrlRecord>,
}

impl InMemoryCollection {
    /// Creates a new empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: DashMap::with_capacity(capacity),
        }
    }
}

#[async_trait]
impl UrlCollection for InMemoryCollection {
    async fn insert_unique(&self, record: UrlRecord) -> Result<()> {
        match self.records.entry(record.key.clone()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(record.key)),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn find_active(&self, key: &str, now: Timestamp) -> Result<Option<UrlRecord>> {
        let Some(record) = self.records.get(key) else {
            return Ok(None);
        };

        if !record.is_active(now) {
            return Ok(None);
        }

        Ok(Some(record.clone()))
    }

    async fn increment_count(&self, key: &str) -> Result<()> {
        let Some(mut record) = self.records.get_mut(key) else {
            return Err(StorageError::NotFound(key.to_owned()));
        };

        record.count += 1;
        Ok(())
    }
}
