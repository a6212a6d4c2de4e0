//! MetadataSource trait definition.
//!
//! The MetadataSource trait abstracts over where column metadata comes from.
//! The primary implementation reads the `metadata_columns` table from SQLite;
//! an in-memory implementation backs tests and fixtures.

use async_trait::async_trait;

use super::types::ColumnRecord;

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Errors raised while retrieving column metadata.
///
/// Every variant means the retrieval failed as a whole; sources never return
/// partially read data.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The query or a pooled connection failed.
    #[error("Error fetching metadata for app {app_name}: {source}")]
    Database {
        app_name: String,
        #[source]
        source: sqlx::Error,
    },

    /// The store could not be opened or is otherwise unusable.
    #[error("Metadata store unavailable: {0}")]
    Unavailable(String),

    /// Any other query failure.
    #[error("Error fetching metadata for app {app_name}: {message}")]
    QueryFailed { app_name: String, message: String },
}

impl MetadataError {
    /// Create a generic query failure.
    pub fn query_failed(app_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::QueryFailed {
            app_name: app_name.into(),
            message: message.into(),
        }
    }
}

/// Trait for fetching column metadata.
///
/// # Ordering
///
/// Implementations must return columns ordered by schema, then by table, so
/// that grouping by first appearance is deterministic. Rows missing a schema
/// or table sort before the others. Order within a table is the source's own.
///
/// # Example
///
/// ```ignore
/// use dq_metadata::metadata::MetadataSource;
///
/// async fn example(source: &impl MetadataSource) -> MetadataResult<()> {
///     let columns = source.fetch_columns("billing", Some("public")).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch all columns for `app_name`, optionally restricted to one schema.
    async fn fetch_columns(
        &self,
        app_name: &str,
        schema: Option<&str>,
    ) -> MetadataResult<Vec<ColumnRecord>>;
}

#[async_trait]
impl<T: MetadataSource + ?Sized> MetadataSource for std::sync::Arc<T> {
    async fn fetch_columns(
        &self,
        app_name: &str,
        schema: Option<&str>,
    ) -> MetadataResult<Vec<ColumnRecord>> {
        (**self).fetch_columns(app_name, schema).await
    }
}
