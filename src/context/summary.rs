//! Per-table summary rendering.
//!
//! The first sentence is always present; the others appear only when their
//! column list is non-empty:
//!
//! ```text
//! Table invoices contains 4 columns: invoice_id, customer_ssn, created_at, amount. Primary candidate fields: invoice_id. Likely PII fields: customer_ssn(PII). Temporal fields: created_at.
//! ```

use crate::enrichment::EnrichmentEngine;
use crate::metadata::ColumnRecord;

/// Raw type markers for the numeric partition.
///
/// Deliberately narrower than [`NormalizedType`](crate::enrichment::NormalizedType):
/// `serial` and `number` are not numeric here.
const NUMERIC_MARKERS: &[&str] = &["int", "decimal", "float", "numeric", "double"];

/// Whether a raw type string counts as numeric for summary partitioning.
pub fn is_numeric_type(raw_type: &str) -> bool {
    let raw_lower = raw_type.to_lowercase();
    NUMERIC_MARKERS.iter().any(|m| raw_lower.contains(m))
}

/// Column partitions for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableProfile<'a> {
    pub table: &'a str,
    /// All column names in retrieval order.
    pub columns: Vec<&'a str>,
    pub primary_keys: Vec<&'a str>,
    /// Rendered as `name(PII)`.
    pub pii_fields: Vec<String>,
    pub temporal_fields: Vec<&'a str>,
    /// Numeric, non-key columns. Not part of the rendered sentence.
    pub numeric_fields: Vec<&'a str>,
}

impl<'a> TableProfile<'a> {
    /// Partition `columns` with the engine's individual detectors.
    pub fn build(engine: &EnrichmentEngine, table: &'a str, columns: &'a [ColumnRecord]) -> Self {
        let mut profile = TableProfile {
            table,
            columns: Vec::with_capacity(columns.len()),
            primary_keys: Vec::new(),
            pii_fields: Vec::new(),
            temporal_fields: Vec::new(),
            numeric_fields: Vec::new(),
        };

        for column in columns {
            let name = column.column_name.as_str();
            let is_key = engine.is_candidate_key(name);

            profile.columns.push(name);
            if is_key {
                profile.primary_keys.push(name);
            }
            if let Some(sensitivity) = engine.detect_sensitivity(name) {
                profile.pii_fields.push(format!("{name}({sensitivity})"));
            }
            if engine.is_temporal(name, &column.data_type) {
                profile.temporal_fields.push(name);
            }
            if is_numeric_type(&column.data_type) && !is_key {
                profile.numeric_fields.push(name);
            }
        }

        profile
    }

    /// Render the summary sentence.
    pub fn render(&self) -> String {
        let mut parts = vec![format!(
            "Table {} contains {} columns: {}.",
            self.table,
            self.columns.len(),
            self.columns.join(", ")
        )];

        if !self.primary_keys.is_empty() {
            parts.push(format!(
                "Primary candidate fields: {}.",
                self.primary_keys.join(", ")
            ));
        }
        if !self.pii_fields.is_empty() {
            parts.push(format!("Likely PII fields: {}.", self.pii_fields.join(", ")));
        }
        if !self.temporal_fields.is_empty() {
            parts.push(format!(
                "Temporal fields: {}.",
                self.temporal_fields.join(", ")
            ));
        }

        parts.join(" ")
    }
}

/// Render the natural-language summary for one table.
pub fn render_table_summary(
    engine: &EnrichmentEngine,
    table: &str,
    columns: &[ColumnRecord],
) -> String {
    TableProfile::build(engine, table, columns).render()
}
