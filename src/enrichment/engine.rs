//! Column classification against the heuristic rule set.

use std::sync::Arc;

use serde::Serialize;

use super::types::{NormalizedType, SemanticRole, Sensitivity};
use crate::config::HeuristicRules;
use crate::metadata::ColumnRecord;

/// Every classification for one column, as reported by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnClassification {
    pub column_name: String,
    pub data_type: String,
    pub normalized_type: NormalizedType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<Sensitivity>,
    pub is_candidate_key: bool,
    pub is_temporal: bool,
    pub semantic_role: SemanticRole,
}

/// Heuristic column classifier.
///
/// Holds a shared reference to the loaded rules and never mutates or reloads
/// them. Every method is a pure function of its arguments and the rules.
#[derive(Debug, Clone)]
pub struct EnrichmentEngine {
    rules: Arc<HeuristicRules>,
}

impl EnrichmentEngine {
    pub fn new(rules: Arc<HeuristicRules>) -> Self {
        Self { rules }
    }

    /// Normalize a raw database type to a coarse category.
    pub fn normalize_datatype(&self, raw_type: &str) -> NormalizedType {
        NormalizedType::from_raw(raw_type)
    }

    /// PII marker if any configured keyword occurs in the column name.
    pub fn detect_sensitivity(&self, column_name: &str) -> Option<Sensitivity> {
        let name_lower = column_name.to_lowercase();
        contains_any(&name_lower, &self.rules.pii_keywords).then_some(Sensitivity::Pii)
    }

    /// Heuristic check for potential primary/candidate keys.
    pub fn is_candidate_key(&self, column_name: &str) -> bool {
        contains_any(&column_name.to_lowercase(), &self.rules.candidate_key_patterns)
    }

    /// Time-related by type, or by name pattern when the type says otherwise.
    pub fn is_temporal(&self, column_name: &str, data_type: &str) -> bool {
        if self.normalize_datatype(data_type) == NormalizedType::Datetime {
            return true;
        }
        contains_any(&column_name.to_lowercase(), &self.rules.temporal_patterns)
    }

    /// Key, then temporal, then measure (integer/float), else attribute.
    pub fn determine_semantic_role(&self, column_name: &str, data_type: &str) -> SemanticRole {
        if self.is_candidate_key(column_name) {
            return SemanticRole::Key;
        }
        if self.is_temporal(column_name, data_type) {
            return SemanticRole::Temporal;
        }
        if self.normalize_datatype(data_type).is_numeric() {
            return SemanticRole::Measure;
        }
        SemanticRole::Attribute
    }

    /// Run every classifier on one column.
    pub fn classify(&self, column_name: &str, data_type: &str) -> ColumnClassification {
        ColumnClassification {
            column_name: column_name.to_string(),
            data_type: data_type.to_string(),
            normalized_type: self.normalize_datatype(data_type),
            sensitivity: self.detect_sensitivity(column_name),
            is_candidate_key: self.is_candidate_key(column_name),
            is_temporal: self.is_temporal(column_name, data_type),
            semantic_role: self.determine_semantic_role(column_name, data_type),
        }
    }

    /// Classify a catalog record.
    pub fn classify_record(&self, column: &ColumnRecord) -> ColumnClassification {
        self.classify(&column.column_name, &column.data_type)
    }
}

fn contains_any(haystack: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|p| haystack.contains(p.as_str()))
}
