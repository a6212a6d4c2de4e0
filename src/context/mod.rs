//! Context synthesis.
//!
//! Turns an application's ordered column records into schema-grouped,
//! natural-language table summaries for LLM context assembly.
//!
//! # Pipeline
//!
//! ```text
//! MetadataSource ──► group_columns ──► TableProfile::build ──► render
//!  (ordered rows)    (schema → table)   (EnrichmentEngine)    (sentence)
//!                                                                 │
//!                                                                 ▼
//!                                              AppContext { app_name, data_dictionary }
//! ```
//!
//! Nothing is cached: every call recomputes from freshly retrieved rows.

mod summary;
mod synthesizer;
mod types;

pub use summary::{is_numeric_type, render_table_summary, TableProfile};
pub use synthesizer::{group_columns, ContextError, ContextResult, ContextSynthesizer, GroupedColumns};
pub use types::{
    AppContext, DataDictionary, MultiAppContext, TableSummaries, DEFAULT_SCHEMA, UNKNOWN_TABLE,
};
