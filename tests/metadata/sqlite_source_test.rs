use dq_metadata::metadata::{
    create_schema, insert_column, ColumnRecord, MetadataError, MetadataSource,
    SqliteMetadataSource,
};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

fn seed(path: &Path) {
    let conn = Connection::open(path).unwrap();
    create_schema(&conn).unwrap();
    // Deliberately out of order: the source must sort by schema, then table.
    for column in [
        ColumnRecord::new("billing", Some("public"), Some("payments"), "payment_id", "bigint"),
        ColumnRecord::new("billing", Some("public"), Some("invoices"), "invoice_id", "integer"),
        ColumnRecord::new("billing", Some("audit"), Some("events"), "event_id", "bigint"),
        ColumnRecord::new("billing", Some("public"), Some("invoices"), "amount", "numeric")
            .with_nullable(false),
        ColumnRecord::new("crm", Some("public"), Some("contacts"), "email", "varchar"),
    ] {
        insert_column(&conn, &column).unwrap();
    }
}

fn names(columns: &[ColumnRecord]) -> Vec<&str> {
    columns.iter().map(|c| c.column_name.as_str()).collect()
}

#[tokio::test]
async fn test_open_and_fetch_ordered() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metadata.db");
    seed(&path);

    let source = SqliteMetadataSource::open(&path, 3).await.unwrap();
    assert_eq!(source.path(), Some(path.as_path()));

    let columns = source.fetch_columns("billing", None).await.unwrap();
    assert_eq!(
        names(&columns),
        vec!["event_id", "invoice_id", "amount", "payment_id"]
    );
    assert!(columns.iter().all(|c| c.app_name == "billing"));
    assert!(!columns[2].is_nullable);
    assert!(columns[1].is_nullable);
}

#[tokio::test]
async fn test_schema_filter_and_blank_filter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metadata.db");
    seed(&path);
    let source = SqliteMetadataSource::open(&path, 1).await.unwrap();

    let audit = source.fetch_columns("billing", Some("audit")).await.unwrap();
    assert_eq!(names(&audit), vec!["event_id"]);

    let blank = source.fetch_columns("billing", Some("")).await.unwrap();
    assert_eq!(blank.len(), 4);

    let none = source.fetch_columns("billing", Some("nope")).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_unknown_app_is_empty_not_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metadata.db");
    seed(&path);
    let source = SqliteMetadataSource::open(&path, 1).await.unwrap();

    let columns = source.fetch_columns("ghost", None).await.unwrap();
    assert!(columns.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_fetches_across_pool() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metadata.db");
    seed(&path);
    let source = Arc::new(SqliteMetadataSource::open(&path, 2).await.unwrap());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let source = Arc::clone(&source);
            let app = if i % 2 == 0 { "billing" } else { "crm" };
            tokio::spawn(async move { source.fetch_columns(app, None).await.map(|c| c.len()) })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let count = handle.await.unwrap().unwrap();
        assert_eq!(count, if i % 2 == 0 { 4 } else { 1 });
    }
}

#[tokio::test]
async fn test_missing_table_reports_database_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE unrelated (x INTEGER);")
        .unwrap();

    let source = SqliteMetadataSource::open(&path, 1).await.unwrap();
    let err = source.fetch_columns("billing", None).await.unwrap_err();
    assert!(matches!(err, MetadataError::Database { .. }));
    assert!(err.to_string().contains("billing"));
}

#[tokio::test]
async fn test_open_missing_file_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let result = SqliteMetadataSource::open(dir.path().join("absent.db"), 1).await;
    assert!(matches!(result, Err(MetadataError::Unavailable(_))));
}

#[tokio::test]
async fn test_busy_connection_does_not_block_idle_ones() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metadata.db");
    seed(&path);
    let source = SqliteMetadataSource::open(&path, 2).await.unwrap();

    // Pin one connection for the whole test; every fetch must use the other.
    let _held = source.pool().acquire().await.unwrap();

    for _ in 0..4 {
        let columns = tokio::time::timeout(
            Duration::from_secs(5),
            source.fetch_columns("billing", None),
        )
        .await
        .expect("fetch waited on the held connection")
        .unwrap();
        assert_eq!(columns.len(), 4);
    }
}
