//! Wait timing configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable that overrides [`WaitConfig::timeout_ms`].
pub const TIMEOUT_ENV: &str = "CALLBACK_HARNESS_TIMEOUT_MS";

/// How long scenarios wait for callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WaitConfig {
    /// Upper bound for an expected callback to arrive.
    pub timeout_ms: u64,
    /// How long the silence check listens for a callback that must not come.
    pub silence_ms: u64,
}

impl WaitConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub fn silence(&self) -> Duration {
        Duration::from_millis(self.silence_ms)
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            silence_ms: 200,
        }
    }
}
