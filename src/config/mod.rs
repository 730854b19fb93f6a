//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! (and optionally a config file) using the `config` and `dotenvy` crates.
//! Configuration is loaded with the `AHP` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use ahp_engine::config::AhpConfig;
//!
//! let config = AhpConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Consistency threshold: {}", config.consistency.threshold);
//! ```

mod consistency;
mod error;
mod logging;

pub use consistency::ConsistencyConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use serde::Deserialize;
use std::path::Path;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AhpConfig {
    /// Consistency gate (threshold, blocking policy)
    #[serde(default)]
    pub consistency: ConsistencyConfig,

    /// Logging (filter directive, output format)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AhpConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `AHP__CONSISTENCY__THRESHOLD=0.15` -> `consistency.threshold = 0.15`
    /// - `AHP__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an optional file, overridden by environment variables
    ///
    /// The file format is inferred from its extension (TOML, YAML, JSON, ...).
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(config::Environment::with_prefix("AHP").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.consistency.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("AHP__CONSISTENCY__THRESHOLD");
        env::remove_var("AHP__CONSISTENCY__BLOCK_ON_VIOLATION");
        env::remove_var("AHP__LOGGING__LOG_LEVEL");
        env::remove_var("AHP__LOGGING__JSON");
    }

    #[test]
    fn test_load_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AhpConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config, AhpConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("AHP__CONSISTENCY__THRESHOLD", "0.15");
        env::set_var("AHP__CONSISTENCY__BLOCK_ON_VIOLATION", "false");
        env::set_var("AHP__LOGGING__JSON", "true");
        let result = AhpConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.consistency.threshold, 0.15);
        assert!(!config.consistency.block_on_violation);
        assert!(config.logging.json);
    }

    #[test]
    fn test_load_from_file_with_env_override() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[consistency]\nthreshold = 0.2\n\n[logging]\nlog_level = \"debug\"").unwrap();

        env::set_var("AHP__CONSISTENCY__THRESHOLD", "0.05");
        let result = AhpConfig::load_from(Some(file.path()));
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.consistency.threshold, 0.05);
        assert_eq!(config.logging.log_level, "debug");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AhpConfig::load_from(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let config = AhpConfig {
            consistency: ConsistencyConfig {
                threshold: 2.0,
                block_on_violation: true,
            },
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidThreshold(2.0)));
    }
}
