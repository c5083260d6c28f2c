//! Per-proxy callback registration list.
//!
//! Registration and unregistration are explicit and paired. Misuse (the same
//! listener twice, or removing an unknown listener) fails fast. Dispatch
//! snapshots the list and schedules one delivery per accepting listener on
//! that listener's own context, outside the lock, so a listener may
//! (un)register from inside a delivery without deadlocking.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::domain::{CallbackEvent, ListenerId, ProxyRef};
use crate::error::RegistrationError;
use crate::port::{CallbackListener, DeliveryContext};

struct Registration {
    listener: Arc<dyn CallbackListener>,
    context: Arc<dyn DeliveryContext>,
}

/// Registration list owned by one proxy.
pub struct CallbackRegistry {
    owner: ProxyRef,
    entries: Mutex<Vec<Registration>>,
}

impl CallbackRegistry {
    /// Create an empty list for callbacks raised by `owner`.
    #[must_use]
    pub fn new(owner: ProxyRef) -> Self {
        Self {
            owner,
            entries: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn owner(&self) -> &ProxyRef {
        &self.owner
    }

    /// Register `listener`; its callbacks run on `context`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::AlreadyRegistered`] if a listener with the
    /// same id is already registered here.
    pub fn register(
        &self,
        listener: Arc<dyn CallbackListener>,
        context: Arc<dyn DeliveryContext>,
    ) -> Result<(), RegistrationError> {
        let id = listener.id();
        let mut entries = self.entries.lock();
        if entries.iter().any(|entry| entry.listener.id() == id) {
            return Err(RegistrationError::AlreadyRegistered {
                listener: id,
                proxy: self.owner.id(),
            });
        }
        debug!(
            proxy = %self.owner,
            listener = %id,
            context = context.name(),
            "Callback registered"
        );
        entries.push(Registration { listener, context });
        Ok(())
    }

    /// Register `listener` and return a guard that unregisters it when
    /// released or dropped.
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register).
    pub fn register_scoped(
        &self,
        listener: Arc<dyn CallbackListener>,
        context: Arc<dyn DeliveryContext>,
    ) -> Result<RegistrationGuard<'_>, RegistrationError> {
        let id = listener.id();
        self.register(listener, context)?;
        Ok(RegistrationGuard {
            registry: self,
            listener: id,
            released: false,
        })
    }

    /// Remove the listener with `id`.
    ///
    /// Deliveries already handed to its context still run.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::NotRegistered`] if no such listener is
    /// registered here.
    pub fn unregister(&self, id: ListenerId) -> Result<(), RegistrationError> {
        let mut entries = self.entries.lock();
        let Some(position) = entries.iter().position(|entry| entry.listener.id() == id) else {
            return Err(RegistrationError::NotRegistered {
                listener: id,
                proxy: self.owner.id(),
            });
        };
        entries.remove(position);
        debug!(proxy = %self.owner, listener = %id, "Callback unregistered");
        Ok(())
    }

    /// Whether a listener with `id` is registered.
    #[must_use]
    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.entries
            .lock()
            .iter()
            .any(|entry| entry.listener.id() == id)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Schedule `event` for every registered listener that accepts its kind.
    ///
    /// Returns the number of deliveries scheduled. A context that refuses the
    /// task (e.g. shut down) is logged and skipped.
    pub fn dispatch(&self, event: CallbackEvent) -> usize {
        let kind = event.kind();
        let targets: Vec<(Arc<dyn CallbackListener>, Arc<dyn DeliveryContext>)> = self
            .entries
            .lock()
            .iter()
            .filter(|entry| entry.listener.accepts(kind))
            .map(|entry| (Arc::clone(&entry.listener), Arc::clone(&entry.context)))
            .collect();

        let event = Arc::new(event);
        let mut scheduled = 0;
        for (listener, context) in targets {
            let source = self.owner.clone();
            let event = Arc::clone(&event);
            let listener_id = listener.id();
            let task = Box::new(move || listener.on_callback(&source, &event));
            match context.execute(task) {
                Ok(()) => scheduled += 1,
                Err(e) => warn!(
                    proxy = %self.owner,
                    listener = %listener_id,
                    error = %e,
                    "Callback delivery dropped"
                ),
            }
        }

        debug!(proxy = %self.owner, kind = %kind, scheduled, "Callback dispatched");
        scheduled
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("owner", &self.owner)
            .field("listeners", &self.len())
            .finish()
    }
}

/// Scoped registration. Unregisters on [`release`](Self::release) or drop.
#[must_use = "dropping the guard unregisters the listener immediately"]
pub struct RegistrationGuard<'a> {
    registry: &'a CallbackRegistry,
    listener: ListenerId,
    released: bool,
}

impl RegistrationGuard<'_> {
    #[must_use]
    pub fn listener(&self) -> ListenerId {
        self.listener
    }

    /// Unregister now and report the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::NotRegistered`] if the listener was
    /// already removed through another path.
    pub fn release(mut self) -> Result<(), RegistrationError> {
        self.released = true;
        self.registry.unregister(self.listener)
    }
}

impl Drop for RegistrationGuard<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.registry.unregister(self.listener) {
            warn!(error = %e, "Scoped registration was already removed");
        }
    }
}
