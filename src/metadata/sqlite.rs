//! SQLite-backed metadata source.
//!
//! Reads the externally maintained `metadata_columns` table through a `sqlx`
//! connection pool. The table is treated as read-only; [`create_schema`] and
//! [`insert_column`] exist for fixtures and seeding.
//!
//! ```text
//! metadata_columns(app_name, table_schema, table_name, column_name, data_type, is_nullable)
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rusqlite::{params, Connection};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::provider::{MetadataError, MetadataResult, MetadataSource};
use super::types::ColumnRecord;

// NULL schemas/tables sort first; rowid keeps catalog order within a table.
const SELECT_BY_APP: &str = "SELECT app_name, table_schema, table_name, column_name, data_type, is_nullable
     FROM metadata_columns
     WHERE app_name = ?1
     ORDER BY table_schema, table_name, rowid";

const SELECT_BY_APP_AND_SCHEMA: &str = "SELECT app_name, table_schema, table_name, column_name, data_type, is_nullable
     FROM metadata_columns
     WHERE app_name = ?1 AND table_schema = ?2
     ORDER BY table_schema, table_name, rowid";

/// Create the `metadata_columns` table if it does not exist.
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS metadata_columns (
            app_name TEXT NOT NULL,
            table_schema TEXT,
            table_name TEXT,
            column_name TEXT NOT NULL,
            data_type TEXT NOT NULL,
            is_nullable INTEGER DEFAULT 1
        );

        CREATE INDEX IF NOT EXISTS idx_metadata_columns_app
            ON metadata_columns(app_name, table_schema, table_name);
        ",
    )
}

/// Insert one column record.
pub fn insert_column(conn: &Connection, column: &ColumnRecord) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO metadata_columns
            (app_name, table_schema, table_name, column_name, data_type, is_nullable)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            column.app_name,
            column.schema,
            column.table,
            column.column_name,
            column.data_type,
            column.is_nullable,
        ],
    )?;
    Ok(())
}

/// One `metadata_columns` row as stored.
#[derive(Debug, sqlx::FromRow)]
struct ColumnRow {
    app_name: String,
    table_schema: Option<String>,
    table_name: Option<String>,
    column_name: String,
    data_type: Option<String>,
    is_nullable: Option<i64>,
}

impl From<ColumnRow> for ColumnRecord {
    fn from(row: ColumnRow) -> Self {
        ColumnRecord {
            app_name: row.app_name,
            schema: row.table_schema,
            table: row.table_name,
            column_name: row.column_name,
            data_type: row.data_type.unwrap_or_default(),
            is_nullable: row.is_nullable.map_or(true, |v| v != 0),
        }
    }
}

/// MetadataSource reading from SQLite through a `sqlx` pool.
///
/// Each query checks out whichever connection is free; connections are
/// opened read-only.
#[derive(Debug, Clone)]
pub struct SqliteMetadataSource {
    pool: SqlitePool,
    path: Option<PathBuf>,
}

impl SqliteMetadataSource {
    /// Open a pool of at most `pool_size` read-only connections to an
    /// existing database file.
    pub async fn open<P: AsRef<Path>>(path: P, pool_size: u32) -> MetadataResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MetadataError::Unavailable(format!(
                "database file not found: {}",
                path.display()
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);
        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size.max(1))
            .connect_with(options)
            .await
            .map_err(|e| {
                MetadataError::Unavailable(format!("failed to open {}: {e}", path.display()))
            })?;

        tracing::info!(path = %path.display(), pool_size, "Opened metadata store");

        Ok(Self {
            pool,
            path: Some(path.to_path_buf()),
        })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool, path: None }
    }

    /// Database file path, if opened from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl MetadataSource for SqliteMetadataSource {
    async fn fetch_columns(
        &self,
        app_name: &str,
        schema: Option<&str>,
    ) -> MetadataResult<Vec<ColumnRecord>> {
        let rows = match schema.filter(|s| !s.is_empty()) {
            Some(schema) => {
                sqlx::query_as::<_, ColumnRow>(SELECT_BY_APP_AND_SCHEMA)
                    .bind(app_name)
                    .bind(schema)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                sqlx::query_as::<_, ColumnRow>(SELECT_BY_APP)
                    .bind(app_name)
                    .fetch_all(&self.pool)
                    .await
            }
        };

        match rows {
            Ok(rows) => {
                tracing::debug!(app_name, columns = rows.len(), "Fetched column metadata");
                Ok(rows.into_iter().map(ColumnRecord::from).collect())
            }
            Err(source) => {
                tracing::error!(app_name, error = %source, "Column metadata query failed");
                Err(MetadataError::Database {
                    app_name: app_name.to_string(),
                    source,
                })
            }
        }
    }
}
