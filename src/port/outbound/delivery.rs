//! Delivery context port.
//!
//! A delivery context decides where a callback runs: a dedicated worker
//! thread, the calling thread, a runtime task. Contexts are injected at
//! registration time so tests choose their own threading.

use crate::error::DeliveryError;

/// A unit of callback work handed to a context.
pub type DeliveryTask = Box<dyn FnOnce() + Send + 'static>;

/// Trait for execution contexts that run callback deliveries.
///
/// Tasks submitted to one context run one at a time, in submission order.
/// Nothing is guaranteed about ordering across different contexts.
pub trait DeliveryContext: Send + Sync {
    /// Human-readable context name for logs and reports.
    fn name(&self) -> &str;

    /// Schedule `task`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Closed`] if the context no longer accepts work.
    fn execute(&self, task: DeliveryTask) -> Result<(), DeliveryError>;
}
