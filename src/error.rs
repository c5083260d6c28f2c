use std::time::Duration;

use thiserror::Error;

use crate::domain::id::{ListenerId, ProxyId};
use crate::domain::value::Value;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Failures reported by an invocation recorder.
///
/// `Timeout` means no (or not enough) events arrived; `Mismatch` means an
/// event arrived but carried the wrong arguments.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecorderError {
    #[error("[{label}] timed out after {waited:?} waiting for {expected} invocation(s), received {received}")]
    Timeout {
        label: String,
        expected: usize,
        received: usize,
        waited: Duration,
    },

    #[error("[{label}] no invocation at index {index} (received {received})")]
    OutOfRange {
        label: String,
        index: usize,
        received: usize,
    },

    #[error("[{label}] invocation {index} arguments differ: expected {expected:?}, got {actual:?}")]
    Mismatch {
        label: String,
        index: usize,
        expected: Vec<Value>,
        actual: Vec<Value>,
    },
}

/// Misuse of a proxy's callback registration list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("listener {listener} is already registered on proxy {proxy}")]
    AlreadyRegistered { listener: ListenerId, proxy: ProxyId },

    #[error("listener {listener} is not registered on proxy {proxy}")]
    NotRegistered { listener: ListenerId, proxy: ProxyId },
}

/// Failures handing work to a delivery context.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("delivery context '{context}' is closed")]
    Closed { context: String },

    #[error("failed to spawn delivery thread '{context}': {source}")]
    Spawn {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Recorder(#[from] RecorderError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario error: {0}")]
    Scenario(String),
}

pub type Result<T> = std::result::Result<T, Error>;
