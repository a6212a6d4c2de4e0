//! Classification result types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse type category derived from a raw, source-specific type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizedType {
    Integer,
    String,
    Float,
    Boolean,
    Datetime,
    Json,
    Uuid,
    Unknown,
}

/// Substring rules in priority order; the first category with a hit wins,
/// so `"interval"` is Integer and `"date_char"` is String.
const TYPE_RULES: &[(NormalizedType, &[&str])] = &[
    (NormalizedType::Integer, &["int", "serial", "number"]),
    (NormalizedType::String, &["char", "text", "string"]),
    (NormalizedType::Float, &["float", "double", "decimal", "numeric"]),
    (NormalizedType::Boolean, &["bool"]),
    (NormalizedType::Datetime, &["date", "time"]),
    (NormalizedType::Json, &["json"]),
    (NormalizedType::Uuid, &["uuid"]),
];

impl NormalizedType {
    /// Classify a raw type string. Blank input yields `Unknown`.
    pub fn from_raw(raw_type: &str) -> Self {
        let raw_lower = raw_type.to_lowercase();
        TYPE_RULES
            .iter()
            .find(|(_, markers)| markers.iter().any(|m| raw_lower.contains(m)))
            .map(|(category, _)| *category)
            .unwrap_or(NormalizedType::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizedType::Integer => "integer",
            NormalizedType::String => "string",
            NormalizedType::Float => "float",
            NormalizedType::Boolean => "boolean",
            NormalizedType::Datetime => "datetime",
            NormalizedType::Json => "json",
            NormalizedType::Uuid => "uuid",
            NormalizedType::Unknown => "unknown",
        }
    }

    /// Integer or float.
    pub fn is_numeric(&self) -> bool {
        matches!(self, NormalizedType::Integer | NormalizedType::Float)
    }
}

impl fmt::Display for NormalizedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sensitivity marker for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sensitivity {
    #[serde(rename = "PII")]
    Pii,
}

impl Sensitivity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sensitivity::Pii => "PII",
        }
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad semantic role of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticRole {
    Key,
    Temporal,
    Measure,
    Attribute,
}

impl SemanticRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticRole::Key => "key",
            SemanticRole::Temporal => "temporal",
            SemanticRole::Measure => "measure",
            SemanticRole::Attribute => "attribute",
        }
    }
}

impl fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
