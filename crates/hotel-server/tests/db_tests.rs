//! Database integration tests using SQLx
//!
//! These tests use the #[sqlx::test] macro, which creates a fresh database
//! per test and applies the workspace migrations. They need `DATABASE_URL`
//! to point at a running PostgreSQL server.
//!
//! Coverage includes:
//! - Ingesting and loading datasets through `PgTableSource`
//! - Replacing and forgetting datasets
//! - The configured default dataset
//! - Missing datasets

use hotel_common::types::fixtures::BookingBuilder;
use hotel_common::{BookingRecord, HotelError};
use sqlx::PgPool;

use hotel_server::analytics::Dataset;
use hotel_server::source::{DatasetRef, DatasetSource, PgTableSource};

fn records() -> Vec<BookingRecord> {
    vec![
        BookingBuilder::new().name("Ana Silva").build(),
        BookingBuilder::new()
            .resort()
            .name("John Smith")
            .country(None)
            .guests(2, None, 1)
            .adr(87.5)
            .build(),
        BookingBuilder::new().name("Maria Santos").canceled(true).build(),
    ]
}

fn named(name: &str) -> DatasetRef {
    DatasetRef::Named(name.to_string())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_ingest_then_load_preserves_order(pool: PgPool) {
    let source = PgTableSource::new(pool, None);
    source.ingest("hotels.csv", &Dataset::new(records())).await.unwrap();

    let loaded = source.load(&named("hotels.csv")).await.unwrap();
    assert_eq!(loaded.records(), records().as_slice());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_ingest_replaces_existing_rows(pool: PgPool) {
    let source = PgTableSource::new(pool.clone(), None);
    source.ingest("hotels.csv", &Dataset::new(records())).await.unwrap();

    let replacement = vec![BookingBuilder::new().name("Only Guest").build()];
    source
        .ingest("hotels.csv", &Dataset::new(replacement.clone()))
        .await
        .unwrap();

    let loaded = source.load(&named("hotels.csv")).await.unwrap();
    assert_eq!(loaded.records(), replacement.as_slice());

    let count: i64 = sqlx::query_scalar("SELECT record_count FROM datasets WHERE name = $1")
        .bind("hotels.csv")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_empty_dataset_round_trips(pool: PgPool) {
    let source = PgTableSource::new(pool, None);
    source.ingest("empty.csv", &Dataset::default()).await.unwrap();

    let loaded = source.load(&named("empty.csv")).await.unwrap();
    assert!(loaded.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_forget_removes_dataset(pool: PgPool) {
    let source = PgTableSource::new(pool.clone(), None);
    source.ingest("hotels.csv", &Dataset::new(records())).await.unwrap();
    source.forget("hotels.csv").await.unwrap();

    let err = source.load(&named("hotels.csv")).await.unwrap_err();
    assert!(matches!(err, HotelError::SourceUnavailable(_)));

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_default_dataset(pool: PgPool) {
    let source = PgTableSource::new(pool, Some("demo".to_string()));
    source.ingest("demo", &Dataset::new(records())).await.unwrap();

    let loaded = source.load(&DatasetRef::Default).await.unwrap();
    assert_eq!(loaded.len(), 3);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_missing_dataset_is_unavailable(pool: PgPool) {
    let source = PgTableSource::new(pool, None);

    let err = source.load(&named("nope.csv")).await.unwrap_err();
    assert!(matches!(err, HotelError::SourceUnavailable(_)));
}
