//! Dedicated worker-thread delivery context.

use std::thread::{self, JoinHandle, ThreadId};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::run_contained;
use crate::error::DeliveryError;
use crate::port::{DeliveryContext, DeliveryTask};

/// Delivery context backed by one named OS thread.
///
/// Tasks run in submission order. [`shutdown`](Self::shutdown) stops intake,
/// lets already-queued tasks finish and joins the thread; dropping the queue
/// does the same.
pub struct WorkerQueue {
    name: String,
    sender: Mutex<Option<mpsc::UnboundedSender<DeliveryTask>>>,
    worker: ThreadId,
    /// Held across `join`, so every `shutdown` caller returns after the drain.
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl WorkerQueue {
    /// Start a worker thread called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Spawn`] if the OS refuses to create the thread.
    pub fn spawn(name: impl Into<String>) -> Result<Self, DeliveryError> {
        let name = name.into();
        let (tx, rx) = mpsc::unbounded_channel();

        let worker_name = name.clone();
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || run_worker(&worker_name, rx))
            .map_err(|source| DeliveryError::Spawn {
                context: name.clone(),
                source,
            })?;

        info!(context = %name, "Delivery worker started");
        Ok(Self {
            name,
            sender: Mutex::new(Some(tx)),
            worker: handle.thread().id(),
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Whether the queue still accepts tasks.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.sender.lock().is_some()
    }

    /// Stop accepting tasks, drain the backlog and join the thread.
    ///
    /// Idempotent. Concurrent callers all return only once the backlog has
    /// drained. Called from the worker thread itself it only stops intake,
    /// since a thread cannot join itself.
    pub fn shutdown(&self) {
        drop(self.sender.lock().take());

        if thread::current().id() == self.worker {
            return;
        }

        let mut handle = self.handle.lock();
        let Some(joined) = handle.take() else {
            return;
        };
        if joined.join().is_err() {
            warn!(context = %self.name, "Delivery worker exited abnormally");
        }
        info!(context = %self.name, "Delivery worker stopped");
    }
}

fn run_worker(name: &str, mut rx: mpsc::UnboundedReceiver<DeliveryTask>) {
    while let Some(task) = rx.blocking_recv() {
        run_contained(name, task);
    }
    debug!(context = name, "Delivery channel closed");
}

impl DeliveryContext for WorkerQueue {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, task: DeliveryTask) -> Result<(), DeliveryError> {
        let closed = || DeliveryError::Closed {
            context: self.name.clone(),
        };
        let sender = self.sender.lock();
        let tx = sender.as_ref().ok_or_else(closed)?;
        tx.send(task).map_err(|_| closed())
    }
}

impl Drop for WorkerQueue {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for WorkerQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerQueue")
            .field("name", &self.name)
            .field("open", &self.is_open())
            .finish()
    }
}
