//! Application context synthesis.

use std::sync::Arc;

use indexmap::IndexMap;

use super::summary::render_table_summary;
use super::types::{AppContext, DataDictionary, TableSummaries, DEFAULT_SCHEMA, UNKNOWN_TABLE};
use crate::enrichment::EnrichmentEngine;
use crate::metadata::{ColumnRecord, MetadataError, MetadataSource};

/// Result type for context synthesis.
pub type ContextResult<T> = Result<T, ContextError>;

/// Errors raised while building application contexts.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    /// Column retrieval failed.
    #[error(transparent)]
    Database(#[from] MetadataError),

    /// The source returned no columns for the application.
    #[error("No metadata found for app '{app_name}'")]
    AppNotFound {
        app_name: String,
        schema: Option<String>,
    },
}

/// Columns grouped as schema → table → columns, in first-seen order.
pub type GroupedColumns = IndexMap<String, IndexMap<String, Vec<ColumnRecord>>>;

/// Group ordered columns by schema and table.
///
/// Missing schemas group under `"default"`, missing tables under `"unknown"`.
pub fn group_columns(columns: Vec<ColumnRecord>) -> GroupedColumns {
    let mut grouped = GroupedColumns::new();
    for column in columns {
        let schema = column
            .schema
            .clone()
            .unwrap_or_else(|| DEFAULT_SCHEMA.to_string());
        let table = column
            .table
            .clone()
            .unwrap_or_else(|| UNKNOWN_TABLE.to_string());

        grouped
            .entry(schema)
            .or_default()
            .entry(table)
            .or_default()
            .push(column);
    }
    grouped
}

/// Builds natural-language metadata contexts for applications.
///
/// Holds no per-request state; one instance serves all requests.
///
/// # Example
///
/// ```ignore
/// use dq_metadata::context::ContextSynthesizer;
///
/// let synthesizer = ContextSynthesizer::new(Arc::new(source), engine);
/// let ctx = synthesizer.build_app_context("billing", None).await?;
/// println!("{}", ctx.summary("public", "invoices").unwrap_or_default());
/// ```
#[derive(Clone)]
pub struct ContextSynthesizer {
    source: Arc<dyn MetadataSource>,
    engine: EnrichmentEngine,
}

impl ContextSynthesizer {
    pub fn new(source: Arc<dyn MetadataSource>, engine: EnrichmentEngine) -> Self {
        Self { source, engine }
    }

    /// Build the context for one application.
    ///
    /// Retrieval errors propagate unchanged. An application with no columns
    /// (after the optional schema filter) is reported as not found.
    pub async fn build_app_context(
        &self,
        app_name: &str,
        schema: Option<&str>,
    ) -> ContextResult<AppContext> {
        let columns = self.source.fetch_columns(app_name, schema).await?;
        if columns.is_empty() {
            return Err(ContextError::AppNotFound {
                app_name: app_name.to_string(),
                schema: schema.map(str::to_string),
            });
        }

        let column_count = columns.len();
        let data_dictionary = self.summarize(group_columns(columns));
        let context = AppContext::new(app_name, data_dictionary);

        tracing::debug!(
            app_name,
            schema = ?schema,
            columns = column_count,
            tables = context.table_count(),
            "Built app context"
        );
        Ok(context)
    }

    /// Build contexts for several applications.
    ///
    /// Builds run concurrently; the result keeps the order of `app_names`. The
    /// first failure fails the whole batch. Names are used as given: bounds
    /// and duplicate checks belong to the caller.
    pub async fn build_multi_app_context<S: AsRef<str>>(
        &self,
        app_names: &[S],
        schema: Option<&str>,
    ) -> ContextResult<Vec<AppContext>> {
        let builds = app_names
            .iter()
            .map(|name| self.build_app_context(name.as_ref(), schema));
        futures::future::try_join_all(builds).await
    }

    fn summarize(&self, grouped: GroupedColumns) -> DataDictionary {
        grouped
            .into_iter()
            .map(|(schema, tables)| {
                let summaries: TableSummaries = tables
                    .into_iter()
                    .map(|(table, columns)| {
                        let summary = render_table_summary(&self.engine, &table, &columns);
                        (table, summary)
                    })
                    .collect();
                (schema, summaries)
            })
            .collect()
    }
}
