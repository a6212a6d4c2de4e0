//! Context response types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Placeholder schema for columns recorded without one.
pub const DEFAULT_SCHEMA: &str = "default";

/// Placeholder table for columns recorded without one.
pub const UNKNOWN_TABLE: &str = "unknown";

/// Table name → rendered summary, in discovery order.
pub type TableSummaries = IndexMap<String, String>;

/// Schema → tables, in discovery order.
pub type DataDictionary = IndexMap<String, TableSummaries>;

/// Natural-language metadata context for one application.
///
/// Serializes as `{"app_name": .., "data_dictionary": {schema: {table: summary}}}`
/// with keys in the order they were first seen in the retrieved columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppContext {
    pub app_name: String,
    #[serde(default)]
    pub data_dictionary: DataDictionary,
}

impl AppContext {
    pub fn new(app_name: impl Into<String>, data_dictionary: DataDictionary) -> Self {
        Self {
            app_name: app_name.into(),
            data_dictionary,
        }
    }

    /// Summary for one table, if present.
    pub fn summary(&self, schema: &str, table: &str) -> Option<&str> {
        self.data_dictionary
            .get(schema)
            .and_then(|tables| tables.get(table))
            .map(String::as_str)
    }

    /// Number of tables across all schemas.
    pub fn table_count(&self) -> usize {
        self.data_dictionary.values().map(IndexMap::len).sum()
    }
}

/// Contexts for several applications, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MultiAppContext {
    #[serde(default)]
    pub apps: Vec<AppContext>,
    #[serde(default)]
    pub total_apps: usize,
}

impl MultiAppContext {
    pub fn new(apps: Vec<AppContext>) -> Self {
        let total_apps = apps.len();
        Self { apps, total_apps }
    }
}
