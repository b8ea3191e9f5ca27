use std::time::Duration;

use jiff::{SignedDuration, Timestamp};
use linklet_storage::{MySqlCollection, StorageError, UrlCollection, UrlRecord};
use linklet_test_infra::mysql::{MySqlServer, MysqlConfig};
use sqlx::mysql::MySqlPoolOptions;

struct Fixture {
    _mysql: MySqlServer,
    collection: MySqlCollection,
}

impl Fixture {
    async fn start() -> Self {
        let mysql = MySqlServer::new(MysqlConfig::builder().build())
            .await
            .expect("start mysql");
        let url = mysql.database_url().await.expect("mysql url");
        let pool = connect_with_retry(&url).await;

        sqlx::query(include_str!("../ddl/mysql/urls.sql"))
            .execute(&pool)
            .await
            .expect("create schema");

        Self {
            _mysql: mysql,
            collection: MySqlCollection::new(pool),
        }
    }
}

async fn connect_with_retry(url: &str) -> sqlx::MySqlPool {
    let mut last_error = None;

    for _ in 0..20 {
        match MySqlPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
        {
            Ok(pool) => return pool,
            Err(err) => {
                last_error = Some(err);
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }

    panic!("failed to connect mysql: {last_error:?}");
}

fn record(key: &str, url: &str, expire_time: Option<Timestamp>) -> UrlRecord {
    UrlRecord::new(key, url, expire_time)
}

#[tokio::test]
async fn insert_and_find_active_record() {
    let fixture = Fixture::start().await;

    fixture
        .collection
        .insert_unique(record("abc123", "https://example.com", None))
        .await
        .unwrap();

    let found = fixture
        .collection
        .find_active("abc123", Timestamp::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.url, "https://example.com");
    assert_eq!(found.expire_time, None);
    assert_eq!(found.count, 0);
}

#[tokio::test]
async fn insert_conflicts_when_key_already_exists() {
    let fixture = Fixture::start().await;

    fixture
        .collection
        .insert_unique(record("abc123", "https://one.example", None))
        .await
        .unwrap();

    let err = fixture
        .collection
        .insert_unique(record("abc123", "https://two.example", None))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Conflict(_)));
}

#[tokio::test]
async fn reserved_and_generated_forms_are_distinct_rows() {
    let fixture = Fixture::start().await;

    fixture
        .collection
        .insert_unique(record("abc", "https://generated.example", None))
        .await
        .unwrap();
    fixture
        .collection
        .insert_unique(record("$abc", "https://reserved.example", None))
        .await
        .unwrap();

    let generated = fixture
        .collection
        .find_active("abc", Timestamp::now())
        .await
        .unwrap()
        .unwrap();
    let reserved = fixture
        .collection
        .find_active("$abc", Timestamp::now())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(generated.url, "https://generated.example");
    assert_eq!(reserved.url, "https://reserved.example");
}

#[tokio::test]
async fn find_filters_expired_records() {
    let fixture = Fixture::start().await;
    let expired = Timestamp::now() - SignedDuration::from_secs(5);

    fixture
        .collection
        .insert_unique(record("expired", "https://example.com", Some(expired)))
        .await
        .unwrap();

    let found = fixture
        .collection
        .find_active("expired", Timestamp::now())
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn expiry_boundary_is_inclusive() {
    let fixture = Fixture::start().await;
    let expire_time = Timestamp::now() + SignedDuration::from_secs(3600);

    fixture
        .collection
        .insert_unique(record("boundary", "https://example.com", Some(expire_time)))
        .await
        .unwrap();

    // Expiry is stored at whole-second precision; probe with the stored value.
    let stored_instant = Timestamp::from_second(expire_time.as_second()).unwrap();

    let at_expiry = fixture
        .collection
        .find_active("boundary", stored_instant)
        .await
        .unwrap();
    assert!(at_expiry.is_some());

    let past_expiry = fixture
        .collection
        .find_active("boundary", stored_instant + SignedDuration::from_secs(1))
        .await
        .unwrap();
    assert!(past_expiry.is_none());
}

#[tokio::test]
async fn increment_grows_count() {
    let fixture = Fixture::start().await;

    fixture
        .collection
        .insert_unique(record("counted", "https://example.com", None))
        .await
        .unwrap();

    fixture.collection.increment_count("counted").await.unwrap();
    fixture.collection.increment_count("counted").await.unwrap();
    fixture.collection.increment_count("counted").await.unwrap();

    let found = fixture
        .collection
        .find_active("counted", Timestamp::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.count, 3);
}

#[tokio::test]
async fn increment_missing_key_is_not_found() {
    let fixture = Fixture::start().await;

    let err = fixture
        .collection
        .increment_count("missing")
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));
}

#[tokio::test]
async fn increment_ignores_expiry() {
    let fixture = Fixture::start().await;
    let expired = Timestamp::now() - SignedDuration::from_secs(5);

    fixture
        .collection
        .insert_unique(record("expired", "https://example.com", Some(expired)))
        .await
        .unwrap();

    fixture.collection.increment_count("expired").await.unwrap();
}
