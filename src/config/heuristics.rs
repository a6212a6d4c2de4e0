//! Heuristic rule set for column classification.
//!
//! The rules live in a TOML document with exactly five fields:
//!
//! ```toml
//! pii_keywords = ["ssn", "email"]
//! candidate_key_patterns = ["_id"]
//! temporal_patterns = ["_at", "_date"]
//! high_cardinality_threshold = 0.9
//! low_cardinality_threshold = 0.1
//! ```
//!
//! Loading is fail-fast: a missing file, an empty document, unknown or missing
//! fields, blank patterns and unusable thresholds are all errors. There is no
//! built-in default rule set to fall back on.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use super::settings::HeuristicsSettings;

/// Error type for heuristics loading.
#[derive(Debug, thiserror::Error)]
pub enum HeuristicsError {
    #[error("Heuristics config file not found (tried {})", format_tried(.tried))]
    FileNotFound { tried: Vec<PathBuf> },

    #[error("Failed to read heuristics file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse heuristics: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Heuristics field '{field}' must not be empty")]
    EmptyList { field: &'static str },

    #[error("Heuristics field '{field}' contains a blank pattern at position {index}")]
    BlankPattern { field: &'static str, index: usize },

    #[error("Heuristics threshold '{field}' must be a finite number, got {value}")]
    InvalidThreshold { field: &'static str, value: f64 },

    #[error("low_cardinality_threshold ({low}) exceeds high_cardinality_threshold ({high})")]
    ThresholdOrder { low: f64, high: f64 },
}

fn format_tried(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The loaded heuristic rules.
///
/// Patterns are stored lower-cased so matching against a lower-cased column
/// name is case-insensitive on both sides.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HeuristicRules {
    /// Substrings marking a column name as personally identifiable.
    pub pii_keywords: Vec<String>,

    /// Substrings marking a column name as a likely identifier.
    pub candidate_key_patterns: Vec<String>,

    /// Substrings marking a column name as date/time related.
    pub temporal_patterns: Vec<String>,

    /// Reserved for cardinality profiling; not consulted by any rule.
    pub high_cardinality_threshold: f64,

    /// Reserved for cardinality profiling; not consulted by any rule.
    pub low_cardinality_threshold: f64,
}

impl HeuristicRules {
    /// Parse and validate rules from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, HeuristicsError> {
        let rules: HeuristicRules = toml::from_str(content)?;
        rules.validated()
    }

    /// Load rules from a single file, without any fallback.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HeuristicsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(HeuristicsError::FileNotFound {
                tried: vec![path.to_path_buf()],
            });
        }

        let content = fs::read_to_string(path).map_err(|source| HeuristicsError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    fn validated(mut self) -> Result<Self, HeuristicsError> {
        normalize_patterns("pii_keywords", &mut self.pii_keywords)?;
        normalize_patterns("candidate_key_patterns", &mut self.candidate_key_patterns)?;
        normalize_patterns("temporal_patterns", &mut self.temporal_patterns)?;

        check_threshold("high_cardinality_threshold", self.high_cardinality_threshold)?;
        check_threshold("low_cardinality_threshold", self.low_cardinality_threshold)?;
        if self.low_cardinality_threshold > self.high_cardinality_threshold {
            return Err(HeuristicsError::ThresholdOrder {
                low: self.low_cardinality_threshold,
                high: self.high_cardinality_threshold,
            });
        }

        Ok(self)
    }
}

fn normalize_patterns(field: &'static str, patterns: &mut [String]) -> Result<(), HeuristicsError> {
    if patterns.is_empty() {
        return Err(HeuristicsError::EmptyList { field });
    }
    for (index, pattern) in patterns.iter_mut().enumerate() {
        // Blank patterns would match every column name.
        if pattern.trim().is_empty() {
            return Err(HeuristicsError::BlankPattern { field, index });
        }
        *pattern = pattern.to_lowercase();
    }
    Ok(())
}

fn check_threshold(field: &'static str, value: f64) -> Result<(), HeuristicsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(HeuristicsError::InvalidThreshold { field, value })
    }
}

/// Loads the heuristic rules once and hands out the same instance afterwards.
///
/// The store is constructed explicitly at startup and shared by reference;
/// concurrent first calls to [`get_rules`](Self::get_rules) block until a single
/// loader has finished, then all observe the same `Arc`.
#[derive(Debug)]
pub struct HeuristicRuleStore {
    primary: PathBuf,
    fallback: Option<PathBuf>,
    rules: OnceCell<Arc<HeuristicRules>>,
}

impl HeuristicRuleStore {
    /// Create a store reading from `primary`, then `fallback` if the primary is absent.
    pub fn new(primary: impl Into<PathBuf>, fallback: Option<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            fallback,
            rules: OnceCell::new(),
        }
    }

    /// Create a store from the `[heuristics]` settings section.
    pub fn from_settings(settings: &HeuristicsSettings) -> Self {
        Self::new(&settings.path, settings.fallback_path.as_ref().map(PathBuf::from))
    }

    /// Create a store that is already initialized with `rules`.
    pub fn with_rules(rules: HeuristicRules) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(Arc::new(rules));
        Self {
            primary: PathBuf::new(),
            fallback: None,
            rules: cell,
        }
    }

    /// Get the rules, loading them on first access.
    ///
    /// A failed load leaves the store uninitialized, so every later call
    /// reports the failure again instead of serving an empty rule set.
    pub fn get_rules(&self) -> Result<Arc<HeuristicRules>, HeuristicsError> {
        self.rules
            .get_or_try_init(|| {
                let path = self.resolve_path()?;
                let rules = HeuristicRules::from_file(&path)?;
                tracing::info!(
                    path = %path.display(),
                    pii_keywords = rules.pii_keywords.len(),
                    candidate_key_patterns = rules.candidate_key_patterns.len(),
                    temporal_patterns = rules.temporal_patterns.len(),
                    "Heuristics loaded"
                );
                Ok(Arc::new(rules))
            })
            .cloned()
    }

    /// Whether the rules have been loaded.
    pub fn is_loaded(&self) -> bool {
        self.rules.get().is_some()
    }

    fn resolve_path(&self) -> Result<PathBuf, HeuristicsError> {
        if self.primary.exists() {
            return Ok(self.primary.clone());
        }

        let mut tried = vec![self.primary.clone()];
        if let Some(fallback) = &self.fallback {
            tracing::debug!(
                primary = %self.primary.display(),
                fallback = %fallback.display(),
                "Heuristics not found at primary path, trying fallback"
            );
            if fallback.exists() {
                return Ok(fallback.clone());
            }
            tried.push(fallback.clone());
        }

        Err(HeuristicsError::FileNotFound { tried })
    }
}
