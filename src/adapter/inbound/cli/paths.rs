//! Path utilities for callback-harness.
//!
//! Settings live under `~/.callback-harness/`:
//! - `~/.callback-harness/harness.toml` - main configuration

use std::path::PathBuf;

/// Returns the harness home directory (`~/.callback-harness/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".callback-harness")
}

/// Returns the default config file path (`~/.callback-harness/harness.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("harness.toml")
}
