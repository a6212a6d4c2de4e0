//! Structured logging setup.
//!
//! Development builds log human-readable lines; production logs one JSON
//! object per event. `RUST_LOG` always wins over the configured level.

use tracing::Level;

use crate::config::ServiceSettings;

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for dependencies.
    pub level: Level,
    /// Log level for this crate.
    pub crate_level: Level,
    /// Whether to use JSON output format.
    pub json_format: bool,
    /// Environment filter override.
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            crate_level: Level::INFO,
            json_format: false,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Creates a configuration for production use.
    pub fn production() -> Self {
        Self {
            level: Level::WARN,
            crate_level: Level::INFO,
            json_format: true,
            env_filter: None,
        }
    }

    /// Creates a configuration for development use.
    pub fn development() -> Self {
        Self {
            level: Level::INFO,
            crate_level: Level::DEBUG,
            json_format: false,
            env_filter: None,
        }
    }

    /// Derive the configuration from service settings.
    ///
    /// An unparsable `log_level` keeps the preset's crate level.
    pub fn from_settings(service: &ServiceSettings) -> Self {
        let config = if service.is_production() {
            Self::production()
        } else {
            Self::development()
        };
        match service.log_level.parse::<Level>() {
            Ok(level) => config.with_crate_level(level),
            Err(_) => config,
        }
    }

    /// Sets the log level for this crate.
    pub fn with_crate_level(mut self, level: Level) -> Self {
        self.crate_level = level;
        self
    }

    /// Sets a custom environment filter.
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Builds the environment filter string.
    pub fn env_filter(&self) -> String {
        if let Some(ref filter) = self.env_filter {
            filter.clone()
        } else {
            format!(
                "{},dq_metadata={}",
                self.level.as_str().to_lowercase(),
                self.crate_level.as_str().to_lowercase()
            )
        }
    }
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

    let fmt_layer = if config.json_format {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
