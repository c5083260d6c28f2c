//! Tokio-runtime delivery context.

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::debug;

use super::run_contained;
use crate::error::DeliveryError;
use crate::port::{DeliveryContext, DeliveryTask};

/// Delivers callbacks from a single task spawned on a tokio runtime.
///
/// One task drains one channel, so deliveries stay FIFO even on a
/// multi-threaded runtime. Dropping the context closes the channel; the task
/// finishes the backlog and exits.
#[derive(Debug)]
pub struct TokioContext {
    name: String,
    sender: mpsc::UnboundedSender<DeliveryTask>,
}

impl TokioContext {
    /// Spawn the draining task on `handle`.
    pub fn spawn(name: impl Into<String>, handle: &Handle) -> Self {
        let name = name.into();
        let (sender, mut rx) = mpsc::unbounded_channel::<DeliveryTask>();

        let task_name = name.clone();
        handle.spawn(async move {
            while let Some(task) = rx.recv().await {
                run_contained(&task_name, task);
            }
            debug!(context = %task_name, "Delivery channel closed");
        });

        Self { name, sender }
    }
}

impl DeliveryContext for TokioContext {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, task: DeliveryTask) -> Result<(), DeliveryError> {
        self.sender
            .send(task)
            .map_err(|_| DeliveryError::Closed {
                context: self.name.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use parking_lot::Mutex;
    use tokio::sync::oneshot;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_runs_in_order_on_runtime() {
        let context = TokioContext::spawn("tokio-test", &Handle::current());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (tx, rx) = oneshot::channel();

        for i in 0..20 {
            let seen = Arc::clone(&seen);
            context
                .execute(Box::new(move || seen.lock().push(i)))
                .unwrap();
        }
        context
            .execute(Box::new(move || {
                let _ = tx.send(());
            }))
            .unwrap();

        rx.await.unwrap();
        assert_eq!(*seen.lock(), (0..20).collect::<Vec<_>>());
    }
}
