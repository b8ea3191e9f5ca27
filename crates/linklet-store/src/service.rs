use crate::error::StoreError;
use crate::store::{SetParams, UrlStore};
use async_trait::async_trait;
use jiff::Timestamp;
use linklet_core::{StorageError, UrlCollection, UrlKey, UrlRecord, Usage};
use linklet_generator::KeyGenerator;
use std::sync::Arc;
use tracing::{debug, warn};

/// Default cap on generated-key insert attempts before giving up.
pub const DEFAULT_MAX_KEY_ATTEMPTS: u32 = 5;

/// A concrete implementation of the [`UrlStore`] trait.
///
/// This service wraps a `UrlCollection` and a `KeyGenerator` to handle:
/// - Key assignment (generated or reserved, with the `$` namespace marker)
/// - Bounded retry when a generated key collides
/// - Expiry-filtered lookups and atomic visit counting
///
/// The usage counters are injected; the service bumps `inserted` and
/// `fetched` only on the corresponding success paths.
#[derive(Debug, Clone)]
pub struct UrlStoreService<C, G> {
    collection: Arc<C>,
    generator: Arc<G>,
    usage: Arc<Usage>,
    max_key_attempts: u32,
}

impl<C: UrlCollection, G: KeyGenerator> UrlStoreService<C, G> {
    /// Creates a new store over the given collection and key generator.
    pub fn new(collection: C, generator: G, usage: Arc<Usage>) -> Self {
        Self {
            collection: Arc::new(collection),
            generator: Arc::new(generator),
            usage,
            max_key_attempts: DEFAULT_MAX_KEY_ATTEMPTS,
        }
    }

    /// Overrides the generated-key retry budget.
    pub fn with_max_key_attempts(mut self, attempts: u32) -> Self {
        self.max_key_attempts = attempts;
        self
    }

    /// Inserts under generated keys, drawing a fresh key on every
    /// collision until the attempt budget runs out. Each attempt awaits
    /// the previous insert's outcome; the loop is sequential by design.
    async fn insert_generated(
        &self,
        url: &str,
        expire_time: Option<Timestamp>,
    ) -> Result<UrlKey, StoreError> {
        for attempt in 1..=self.max_key_attempts {
            let key = self.generator.generate();
            let record = UrlRecord::new(key.as_str(), url, expire_time);

            match self.collection.insert_unique(record).await {
                Ok(()) => return Ok(key),
                Err(StorageError::Conflict(taken)) => {
                    debug!(key = %taken, attempt, "generated key collided, retrying");
                }
                Err(err) => return Err(storage_to_store_error(err)),
            }
        }

        warn!(
            attempts = self.max_key_attempts,
            "key assignment exhausted its retry budget"
        );
        Err(StoreError::KeyAssignmentExhausted {
            attempts: self.max_key_attempts,
        })
    }

    /// Inserts under a reserved key. A collision is the caller's to
    /// resolve, so there is no retry here.
    async fn insert_reserved(
        &self,
        key: UrlKey,
        url: &str,
        expire_time: Option<Timestamp>,
    ) -> Result<UrlKey, StoreError> {
        let record = UrlRecord::new(key.as_str(), url, expire_time);

        match self.collection.insert_unique(record).await {
            Ok(()) => Ok(key),
            Err(StorageError::Conflict(_)) => {
                Err(StoreError::DuplicateKey(key.as_str().to_owned()))
            }
            Err(err) => Err(storage_to_store_error(err)),
        }
    }

    async fn find_active(&self, key: &str) -> Result<UrlRecord, StoreError> {
        let record = self
            .collection
            .find_active(key, Timestamp::now())
            .await
            .map_err(storage_to_store_error)?;

        record.ok_or(StoreError::KeyNotFound)
    }
}

#[async_trait]
impl<C: UrlCollection, G: KeyGenerator> UrlStore for UrlStoreService<C, G> {
    async fn set(&self, params: SetParams) -> Result<UrlKey, StoreError> {
        let key = match params.key.as_deref() {
            Some(name) if !name.is_empty() => {
                let key = UrlKey::reserved(name)?;
                self.insert_reserved(key, &params.url, params.expire_time)
                    .await?
            }
            _ => {
                self.insert_generated(&params.url, params.expire_time)
                    .await?
            }
        };

        self.usage.record_inserted();
        Ok(key)
    }

    async fn get(&self, key: &str) -> Result<String, StoreError> {
        let record = self.find_active(key).await?;
        self.usage.record_fetched();
        Ok(record.url)
    }

    async fn count(&self, key: &str) -> Result<u64, StoreError> {
        Ok(self.find_active(key).await?.count)
    }

    async fn inc(&self, key: &str) -> Result<(), StoreError> {
        self.collection
            .increment_count(key)
            .await
            .map_err(storage_to_store_error)
    }
}

/// Converts an adapter error to a caller-facing store error.
///
/// `Conflict` is consumed at the insert call sites, where it drives the
/// retry loop or becomes `DuplicateKey`. Anything that reaches this point
/// is a plain storage failure, including `NotFound` from the increment
/// path, which stays a storage error rather than `KeyNotFound`.
fn storage_to_store_error(e: StorageError) -> StoreError {
    StoreError::Storage(e.to_string())
}
