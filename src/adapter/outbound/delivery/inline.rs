//! Synchronous delivery context.

use super::run_contained;
use crate::error::DeliveryError;
use crate::port::{DeliveryContext, DeliveryTask};

/// Runs each delivery immediately on the thread that dispatched it.
///
/// Deterministic stand-in for a worker queue in unit tests. Dispatch returns
/// only after the listener has run.
#[derive(Debug, Clone)]
pub struct InlineContext {
    name: String,
}

impl InlineContext {
    #[must_use]
    pub fn new() -> Self {
        Self::named("inline")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for InlineContext {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryContext for InlineContext {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, task: DeliveryTask) -> Result<(), DeliveryError> {
        run_contained(&self.name, task);
        Ok(())
    }
}
