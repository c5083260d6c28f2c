//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::wait::TIMEOUT_ENV;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../harness.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note(&format!(
        "2. Run: callback-harness config validate -c {}",
        path.display()
    ));
    output::note(&format!("3. Run: callback-harness run -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
///
/// Prints the effective configuration: file values over defaults, with
/// environment overrides applied. A missing file shows the defaults.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load_or_default(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());
    if !path.exists() {
        output::note("(file not found, showing defaults)");
    }

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    output::section("Wait");
    output::field("Timeout", format!("{}ms", config.wait.timeout_ms));
    output::field("Silence", format!("{}ms", config.wait.silence_ms));
    if std::env::var_os(TIMEOUT_ENV).is_some() {
        output::hint(&format!("timeout overridden by {TIMEOUT_ENV}"));
    }

    output::section("Delivery");
    output::field("Kind", config.delivery.kind);
    output::field("Thread", &config.delivery.thread_name);

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    Config::load(path)?;
    output::success("Config file is valid");
    output::field(
        "Next",
        format!("callback-harness config show -c {}", path.display()),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_temp_dir() -> TempDir {
        tempfile::tempdir().expect("Failed to create temp directory")
    }

    #[test]
    fn test_config_template_is_valid_config() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).expect("template parses");
        config.validate().expect("template validates");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_execute_init_writes_template_content() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("nested").join("harness.toml");

        execute_init(&config_path, false).unwrap();
        let content = fs::read_to_string(&config_path).unwrap();
        assert_eq!(content, CONFIG_TEMPLATE);
    }

    #[test]
    fn test_execute_init_fails_if_file_exists_without_force() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("harness.toml");
        fs::write(&config_path, "existing content").unwrap();

        assert!(execute_init(&config_path, false).is_err());
        let content = fs::read_to_string(&config_path).unwrap();
        assert_eq!(content, "existing content");
    }

    #[test]
    fn test_execute_init_overwrites_with_force() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("harness.toml");
        fs::write(&config_path, "existing content").unwrap();

        execute_init(&config_path, true).unwrap();
        let content = fs::read_to_string(&config_path).unwrap();
        assert_eq!(content, CONFIG_TEMPLATE);
    }

    #[test]
    fn test_execute_validate_rejects_missing_file() {
        let temp_dir = create_temp_dir();
        let result = execute_validate(&temp_dir.path().join("absent.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_execute_show_accepts_missing_file() {
        let temp_dir = create_temp_dir();
        assert!(execute_show(&temp_dir.path().join("absent.toml")).is_ok());
    }
}
