//! Harness configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all harness settings.
//! Configuration is loaded from a TOML file; every section is optional and
//! falls back to its defaults. `CALLBACK_HARNESS_TIMEOUT_MS` overrides the
//! wait timeout.
//!
//! # Example
//!
//! ```no_run
//! use callback_harness::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("harness.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::delivery::DeliveryConfig;
use super::logging::{LoggingConfig, LOG_FORMATS};
use super::wait::{WaitConfig, TIMEOUT_ENV};
use crate::error::{ConfigError, Result};

/// Main harness configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Callback wait timing.
    #[serde(default)]
    pub wait: WaitConfig,

    /// Delivery context used by scenarios.
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

impl Config {
    /// Parse configuration from TOML, apply environment overrides and
    /// validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed, the timeout override is not
    /// a number, or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_timeout_override(std::env::var(TIMEOUT_ENV).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or [`parse_toml`](Self::parse_toml)
    /// fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise use defaults (with environment
    /// overrides applied).
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load) when the file exists.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    fn apply_timeout_override(&mut self, value: Option<String>) -> Result<()> {
        let Some(raw) = value else {
            return Ok(());
        };
        self.wait.timeout_ms = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            field: TIMEOUT_ENV,
            reason: format!("expected milliseconds, got {raw:?}"),
        })?;
        Ok(())
    }

    /// Check that values are within acceptable ranges.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<()> {
        if self.wait.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "wait.timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.wait.silence_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "wait.silence_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.delivery.thread_name.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "delivery.thread_name",
            }
            .into());
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "logging.level",
            }
            .into());
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("must be one of {}", LOG_FORMATS.join(", ")),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::infrastructure::config::delivery::DeliveryKind;

    fn parse_without_env(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_without_env("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.wait.timeout_ms, 5_000);
        assert_eq!(config.wait.silence_ms, 200);
        assert_eq!(config.delivery.kind, DeliveryKind::Worker);
        assert_eq!(config.delivery.thread_name, "CallbackThread");
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = parse_without_env(
            r#"
            [wait]
            silence_ms = 50

            [delivery]
            kind = "inline"
            "#,
        )
        .unwrap();

        assert_eq!(config.wait.timeout_ms, 5_000);
        assert_eq!(config.wait.silence_ms, 50);
        assert_eq!(config.delivery.kind, DeliveryKind::Inline);
        assert_eq!(config.delivery.thread_name, "CallbackThread");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = parse_without_env("[wait]\ntimeout_ms = 0\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "wait.timeout_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let err = parse_without_env("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(err.to_string().contains("logging.format"));
    }

    #[test]
    fn test_blank_thread_name_rejected() {
        let err = parse_without_env("[delivery]\nthread_name = \" \"\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "delivery.thread_name"
            })
        ));
    }

    #[test]
    fn test_unknown_delivery_kind_is_parse_error() {
        let err = parse_without_env("[delivery]\nkind = \"carrier-pigeon\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn test_timeout_override_applies() {
        let mut config = Config::default();
        config
            .apply_timeout_override(Some(" 750 ".to_string()))
            .unwrap();
        assert_eq!(config.wait.timeout_ms, 750);

        config.apply_timeout_override(None).unwrap();
        assert_eq!(config.wait.timeout_ms, 750);
    }

    #[test]
    fn test_timeout_override_must_be_numeric() {
        let mut config = Config::default();
        let err = config
            .apply_timeout_override(Some("soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_ENV));
    }
}
