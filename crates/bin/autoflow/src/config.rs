//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `autoflow.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use autoflow_app::services::NewAutomationDefaults;
use autoflow_domain::automation::DEFAULT_NAME;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Field values for newly added automations.
    pub automations: AutomationsConfig,
    /// Change bus settings.
    pub events: EventsConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Defaults applied by the list view's "add" action.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AutomationsConfig {
    pub default_name: String,
    pub default_enabled: bool,
}

/// Store change bus configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Broadcast channel capacity.
    pub capacity: usize,
}

impl Config {
    /// Load configuration from `autoflow.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("autoflow.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("AUTOFLOW_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("AUTOFLOW_DEFAULT_ENABLED")
            && let Ok(enabled) = val.parse()
        {
            self.automations.default_enabled = enabled;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.events.capacity == 0 {
            return Err(ConfigError::Validation(
                "events capacity must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Defaults handed to the list orchestrator.
    #[must_use]
    pub fn new_automation_defaults(&self) -> NewAutomationDefaults {
        NewAutomationDefaults {
            name: self.automations.default_name.clone(),
            enabled: self.automations.default_enabled,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "autoflow=info,autoflow_app=info".to_string(),
        }
    }
}

impl Default for AutomationsConfig {
    fn default() -> Self {
        Self {
            default_name: DEFAULT_NAME.to_string(),
            default_enabled: true,
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
