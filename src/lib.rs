//! # dq-metadata
//!
//! Read-only column metadata catalog rendered as schema-grouped,
//! natural-language descriptions for LLM context assembly.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │               HeuristicRuleStore (config)                │
//! │   PII keywords, key/temporal patterns - loaded once      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [Arc<HeuristicRules>]
//! ┌─────────────────────────────────────────────────────────┐
//! │                  EnrichmentEngine                        │
//! │   type normalization, PII, candidate key, temporal       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │   MetadataSource ──► ContextSynthesizer ──► AppContext   │
//! │   (ordered rows)     (group + render)       (per app)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [web, feature "server"]
//! ┌─────────────────────────────────────────────────────────┐
//! │        GET /metadata/context, /metadata/context/multi    │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod context;
pub mod enrichment;
pub mod logging;
pub mod metadata;

#[cfg(feature = "server")]
pub mod web;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{HeuristicRuleStore, HeuristicRules, HeuristicsError, Settings};
    pub use crate::context::{
        render_table_summary, AppContext, ContextError, ContextSynthesizer, MultiAppContext,
    };
    pub use crate::enrichment::{EnrichmentEngine, NormalizedType, SemanticRole, Sensitivity};
    pub use crate::metadata::{
        ColumnRecord, InMemoryMetadataSource, MetadataError, MetadataSource, SqliteMetadataSource,
    };
}

pub use context::{AppContext, ContextSynthesizer, MultiAppContext};
pub use enrichment::EnrichmentEngine;
