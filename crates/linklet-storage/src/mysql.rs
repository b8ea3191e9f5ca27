use async_trait::async_trait;
use jiff::Timestamp;
use linklet_core::error::{Result, StorageError};
use linklet_core::{UrlCollection, UrlRecord};
use sqlx::{MySqlPool, Row};

/// MySQL implementation of the backing-store contract.
///
/// The `urls` table carries a unique index on `url_key`, which is what
/// turns a duplicate insert into a typed `Conflict`. Expiry is stored as
/// unix seconds and applied as a read-time filter; rows are never deleted.
/// The counter update is a single `UPDATE ... SET visit_count =
/// visit_count + 1`, so increments stay atomic without client-side locking.
#[derive(Debug, Clone)]
pub struct MySqlCollection {
    pool: MySqlPool,
}

impl MySqlCollection {
    /// Creates a collection from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a collection by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn parse_expire_time(seconds: Option<i64>) -> Result<Option<Timestamp>> {
    seconds
        .map(|value| {
            Timestamp::from_second(value).map_err(|e| {
                StorageError::InvalidData(format!("invalid expire_at timestamp '{}': {e}", value))
            })
        })
        .transpose()
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl UrlCollection for MySqlCollection {
    async fn insert_unique(&self, record: UrlRecord) -> Result<()> {
        let expire_at = record.expire_time.map(|ts| ts.as_second());

        let result = sqlx::query(
            r#"
            INSERT INTO urls (url_key, target_url, expire_at, visit_count)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(record.key.as_str())
        .bind(record.url.as_str())
        .bind(expire_at)
        .bind(record.count)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(record.key)),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn find_active(&self, key: &str, now: Timestamp) -> Result<Option<UrlRecord>> {
        let row = sqlx::query(
            r#"
            SELECT target_url, expire_at, visit_count
            FROM urls
            WHERE url_key = ?
              AND (expire_at IS NULL OR expire_at >= ?)
            LIMIT 1
            "#,
        )
        .bind(key)
        .bind(now.as_second())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let url: String = row.try_get("target_url").map_err(map_sqlx_error)?;
        let expire_at_raw: Option<i64> = row.try_get("expire_at").map_err(map_sqlx_error)?;
        let expire_time = parse_expire_time(expire_at_raw)?;
        let count: u64 = row.try_get("visit_count").map_err(map_sqlx_error)?;

        Ok(Some(UrlRecord {
            key: key.to_owned(),
            url,
            expire_time,
            count,
        }))
    }

    async fn increment_count(&self, key: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE urls
            SET visit_count = visit_count + 1
            WHERE url_key = ?
            "#,
        )
        .bind(key)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(key.to_owned()));
        }

        Ok(())
    }
}
