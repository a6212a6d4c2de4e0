//! In-memory metadata source.

use std::collections::HashSet;

use async_trait::async_trait;

use super::provider::{MetadataError, MetadataResult, MetadataSource};
use super::types::ColumnRecord;

/// MetadataSource over a fixed set of records.
///
/// Applies the same filter and ordering contract as the SQLite source. Apps
/// registered with [`fail_for`](Self::fail_for) report a query failure, which
/// lets callers exercise error propagation without a database.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMetadataSource {
    columns: Vec<ColumnRecord>,
    failing_apps: HashSet<String>,
}

impl InMemoryMetadataSource {
    pub fn new(columns: Vec<ColumnRecord>) -> Self {
        Self {
            columns,
            failing_apps: HashSet::new(),
        }
    }

    /// Make every fetch for `app_name` fail.
    pub fn fail_for(mut self, app_name: impl Into<String>) -> Self {
        self.failing_apps.insert(app_name.into());
        self
    }
}

#[async_trait]
impl MetadataSource for InMemoryMetadataSource {
    async fn fetch_columns(
        &self,
        app_name: &str,
        schema: Option<&str>,
    ) -> MetadataResult<Vec<ColumnRecord>> {
        if self.failing_apps.contains(app_name) {
            return Err(MetadataError::query_failed(app_name, "simulated failure"));
        }

        let schema = schema.filter(|s| !s.is_empty());
        let mut columns: Vec<ColumnRecord> = self
            .columns
            .iter()
            .filter(|c| c.app_name == app_name)
            .filter(|c| schema.is_none() || c.schema.as_deref() == schema)
            .cloned()
            .collect();

        // Stable sort keeps insertion order within a table; None sorts first.
        columns.sort_by(|a, b| (&a.schema, &a.table).cmp(&(&b.schema, &b.table)));
        Ok(columns)
    }
}
