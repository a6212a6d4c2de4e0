//! TOML-based configuration for dq-metadata.
//!
//! Supports a config file (dq-metadata.toml) with environment variable expansion
//! and a handful of environment overrides for containerized deployments.
//!
//! Example configuration:
//! ```toml
//! [service]
//! env = "production"
//! log_level = "info"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//!
//! [database]
//! path = "${DQ_DATA_DIR}/metadata.db"
//!
//! [heuristics]
//! path = "config/heuristics.toml"
//! fallback_path = "../config/heuristics.toml"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Service identity and runtime mode.
    pub service: ServiceSettings,

    /// HTTP listener.
    pub server: ServerSettings,

    /// Metadata store.
    pub database: DatabaseSettings,

    /// Heuristics document location.
    pub heuristics: HeuristicsSettings,
}

/// Service identity and runtime mode.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name reported by the health endpoint.
    pub project_name: String,

    /// Runtime environment: "development" or "production".
    pub env: String,

    /// Default log level when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            project_name: "dq-metadata".to_string(),
            env: "development".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ServiceSettings {
    /// Whether the service runs in production mode.
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerSettings {
    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Metadata store settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Path to the SQLite file holding `metadata_columns` (supports ${ENV_VAR} expansion).
    pub path: String,

    /// Number of read connections kept open.
    pub pool_size: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "metadata.db".to_string(),
            pool_size: 5,
        }
    }
}

impl DatabaseSettings {
    /// Get the database path with environment variables expanded.
    pub fn resolved_path(&self) -> Result<PathBuf, SettingsError> {
        expand_env_vars(&self.path).map(PathBuf::from)
    }
}

/// Heuristics document location.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HeuristicsSettings {
    /// Primary path of the heuristics document.
    pub path: String,

    /// Tried once when the primary path does not exist.
    pub fallback_path: Option<String>,
}

impl Default for HeuristicsSettings {
    fn default() -> Self {
        Self {
            path: "config/heuristics.toml".to_string(),
            fallback_path: Some("../config/heuristics.toml".to_string()),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `DQ_METADATA_CONFIG`
    /// 2. `./dq-metadata.toml`
    /// 3. `~/.config/dq-metadata/config.toml`
    ///
    /// Environment overrides are applied on top of whichever source wins.
    pub fn load() -> Result<Self, SettingsError> {
        let mut settings = Self::load_file()?;
        settings.apply_env_overrides()?;
        settings.validate()?;
        Ok(settings)
    }

    fn load_file() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("DQ_METADATA_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("dq-metadata.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("dq-metadata").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Apply `DQ_ENV`, `DQ_LOG_LEVEL`, `DQ_DB_PATH` and `DQ_SERVER_PORT` overrides.
    pub fn apply_env_overrides(&mut self) -> Result<(), SettingsError> {
        if let Ok(value) = env::var("DQ_ENV") {
            self.service.env = value;
        }
        if let Ok(value) = env::var("DQ_LOG_LEVEL") {
            self.service.log_level = value;
        }
        if let Ok(value) = env::var("DQ_DB_PATH") {
            self.database.path = value;
        }
        if let Ok(value) = env::var("DQ_SERVER_PORT") {
            self.server.port = value.parse().map_err(|_| {
                SettingsError::InvalidConfig(format!("DQ_SERVER_PORT is not a port: {value}"))
            })?;
        }
        Ok(())
    }

    /// Check values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.database.pool_size == 0 {
            return Err(SettingsError::InvalidConfig(
                "database.pool_size must be at least 1".to_string(),
            ));
        }
        if self.heuristics.path.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "heuristics.path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let mut var_name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                var_name.push(ch);
            }
            if var_name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
                continue;
            }
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
