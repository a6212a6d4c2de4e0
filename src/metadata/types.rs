//! Column metadata records.

use serde::{Deserialize, Serialize};

/// One row of the `metadata_columns` catalog.
///
/// Schema and table may be absent in the source catalog; they are kept as
/// `None` here and only replaced by placeholders when grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRecord {
    /// Application owning the column.
    pub app_name: String,
    /// Database schema, if recorded.
    pub schema: Option<String>,
    /// Table name, if recorded.
    pub table: Option<String>,
    /// Column name.
    pub column_name: String,
    /// Raw, source-specific type string. May be blank.
    #[serde(default)]
    pub data_type: String,
    /// Whether the column accepts NULL.
    #[serde(default = "default_nullable")]
    pub is_nullable: bool,
}

fn default_nullable() -> bool {
    true
}

impl ColumnRecord {
    /// Create a nullable column record.
    pub fn new(
        app_name: impl Into<String>,
        schema: Option<&str>,
        table: Option<&str>,
        column_name: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            schema: schema.map(str::to_string),
            table: table.map(str::to_string),
            column_name: column_name.into(),
            data_type: data_type.into(),
            is_nullable: true,
        }
    }

    /// Set nullability.
    pub fn with_nullable(mut self, is_nullable: bool) -> Self {
        self.is_nullable = is_nullable;
        self
    }
}
