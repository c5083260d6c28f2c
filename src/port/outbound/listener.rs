//! Listener port for callback delivery.
//!
//! A proxy's registration list holds [`CallbackListener`]s and hands each
//! accepted callback to them on the listener's delivery context.

use crate::domain::{CallbackEvent, EventKind, ListenerId, ProxyRef};

/// Trait for callback receivers.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`); deliveries arrive
///   on whatever context the listener was registered with
/// - `on_callback` should return quickly and must not block on the thread
///   that raised the stimulus
pub trait CallbackListener: Send + Sync {
    /// Identity used for registration bookkeeping.
    fn id(&self) -> ListenerId;

    /// Whether this listener handles callbacks of `kind`.
    ///
    /// Deliveries are only scheduled for accepted kinds.
    fn accepts(&self, kind: EventKind) -> bool;

    /// Handle one callback raised by `source`.
    fn on_callback(&self, source: &ProxyRef, event: &CallbackEvent);
}
