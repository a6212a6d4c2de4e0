//! Heuristic column enrichment.
//!
//! Classifies individual columns by name and raw type:
//!
//! - **Normalized type** - coarse category from the raw type string
//! - **Sensitivity** - PII keyword found in the column name
//! - **Candidate key** - identifier pattern found in the column name
//! - **Temporal** - datetime type, or a temporal pattern in the column name
//! - **Semantic role** - key, temporal, measure or attribute
//!
//! All matching is case-insensitive substring matching; nothing here looks at
//! column values.
//!
//! # Example
//!
//! ```ignore
//! use dq_metadata::enrichment::{EnrichmentEngine, SemanticRole};
//!
//! let engine = EnrichmentEngine::new(store.get_rules()?);
//! assert_eq!(engine.determine_semantic_role("invoice_id", "integer"), SemanticRole::Key);
//! ```

mod engine;
mod types;

pub use engine::{ColumnClassification, EnrichmentEngine};
pub use types::{NormalizedType, SemanticRole, Sensitivity};
