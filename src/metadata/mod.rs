//! Metadata source module.
//!
//! Abstracts over where column metadata comes from. Sources return the columns
//! of one application ordered by schema and table; everything downstream
//! relies on that ordering for deterministic grouping.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                    MetadataSource                     │
//! │  fetch_columns(app_name, schema?) -> Vec<ColumnRecord>│
//! └───────────────────────────────────────────────────────┘
//!            │                              │
//!            ▼                              ▼
//! ┌──────────────────────┐      ┌──────────────────────────┐
//! │ SqliteMetadataSource │      │ InMemoryMetadataSource   │
//! │ (metadata_columns)   │      │ (fixtures, tests)        │
//! └──────────────────────┘      └──────────────────────────┘
//! ```

mod in_memory;
mod provider;
mod sqlite;
mod types;

pub use in_memory::InMemoryMetadataSource;
pub use provider::{MetadataError, MetadataResult, MetadataSource};
pub use sqlite::{create_schema, insert_column, SqliteMetadataSource};
pub use types::ColumnRecord;
