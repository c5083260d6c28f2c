//! Manually drained delivery context.

use std::collections::VecDeque;

use parking_lot::Mutex;

use super::run_contained;
use crate::error::DeliveryError;
use crate::port::{DeliveryContext, DeliveryTask};

/// Holds deliveries until [`run_pending`](Self::run_pending) is called.
///
/// Lets a test observe the state between "callback raised" and "callback
/// delivered", and choose exactly when delivery happens.
pub struct ManualContext {
    name: String,
    queue: Mutex<VecDeque<DeliveryTask>>,
}

impl ManualContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            queue: Mutex::new(VecDeque::new()),
        }
    }

    /// Number of deliveries waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Run queued deliveries in FIFO order on the calling thread until the
    /// queue is empty, including any queued while draining. Returns how many
    /// ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.queue.lock().pop_front();
            let Some(task) = next else {
                return ran;
            };
            run_contained(&self.name, task);
            ran += 1;
        }
    }

    /// Run at most one queued delivery. Returns whether one ran.
    pub fn run_one(&self) -> bool {
        let next = self.queue.lock().pop_front();
        match next {
            Some(task) => {
                run_contained(&self.name, task);
                true
            }
            None => false,
        }
    }
}

impl DeliveryContext for ManualContext {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, task: DeliveryTask) -> Result<(), DeliveryError> {
        self.queue.lock().push_back(task);
        Ok(())
    }
}

impl std::fmt::Debug for ManualContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualContext")
            .field("name", &self.name)
            .field("pending", &self.pending())
            .finish()
    }
}
