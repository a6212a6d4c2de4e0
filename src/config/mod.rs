//! Configuration module for dq-metadata.
//!
//! Handles service settings, environment overrides and the heuristic rule set.

mod heuristics;
mod settings;

pub use heuristics::{HeuristicRuleStore, HeuristicRules, HeuristicsError};
pub use settings::{
    expand_env_vars, DatabaseSettings, HeuristicsSettings, ServerSettings, ServiceSettings,
    Settings, SettingsError,
};
