//! Delivery context configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which delivery context scenarios register their listeners on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryKind {
    /// Dedicated named worker thread.
    #[default]
    Worker,
    /// Test stand-in; delivery is synchronous on the stimulus thread.
    Inline,
    /// A task on a multi-threaded tokio runtime.
    Tokio,
}

impl fmt::Display for DeliveryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Worker => "worker",
            Self::Inline => "inline",
            Self::Tokio => "tokio",
        };
        f.write_str(name)
    }
}

/// Delivery settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DeliveryConfig {
    pub kind: DeliveryKind,
    /// Name given to the worker thread (or used as the context name).
    pub thread_name: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            kind: DeliveryKind::Worker,
            thread_name: "CallbackThread".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_inline_help_marks_synchronous_delivery() {
        let value = DeliveryKind::Inline
            .to_possible_value()
            .expect("inline is a possible value");
        let help = value.get_help().map(ToString::to_string).unwrap_or_default();
        assert!(help.contains("synchronous"), "{help}");
    }

    #[test]
    fn test_kind_parses_lowercase_names() {
        let config: DeliveryConfig = toml::from_str("kind = \"inline\"").unwrap();
        assert_eq!(config.kind, DeliveryKind::Inline);
        assert_eq!(config.thread_name, "CallbackThread");
    }
}
