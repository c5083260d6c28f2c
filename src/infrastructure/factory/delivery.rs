//! Delivery context factory.

use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};
use tracing::info;

use crate::adapter::outbound::delivery::{InlineContext, TokioContext, WorkerQueue};
use crate::error::{DeliveryError, Result};
use crate::infrastructure::config::delivery::{DeliveryConfig, DeliveryKind};
use crate::port::DeliveryContext;

/// A delivery context plus whatever keeps it running.
///
/// Holds the tokio runtime for [`DeliveryKind::Tokio`]; dropping the stack
/// shuts the runtime down after the context.
pub struct DeliveryStack {
    context: Arc<dyn DeliveryContext>,
    _runtime: Option<Runtime>,
}

impl DeliveryStack {
    #[must_use]
    pub fn context(&self) -> Arc<dyn DeliveryContext> {
        Arc::clone(&self.context)
    }
}

impl std::fmt::Debug for DeliveryStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryStack")
            .field("context", &self.context.name())
            .field("runtime", &self._runtime.is_some())
            .finish()
    }
}

/// Build the delivery context selected by `config`.
///
/// # Errors
///
/// Returns [`DeliveryError::Spawn`] if the worker thread or runtime cannot be
/// started.
pub fn build_delivery(config: &DeliveryConfig) -> Result<DeliveryStack> {
    let name = config.thread_name.clone();
    let stack = match config.kind {
        DeliveryKind::Worker => DeliveryStack {
            context: Arc::new(WorkerQueue::spawn(name)?),
            _runtime: None,
        },
        DeliveryKind::Inline => DeliveryStack {
            context: Arc::new(InlineContext::named(name)),
            _runtime: None,
        },
        DeliveryKind::Tokio => {
            let runtime = Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name(name.clone())
                .enable_all()
                .build()
                .map_err(|source| DeliveryError::Spawn {
                    context: name.clone(),
                    source,
                })?;
            let context = TokioContext::spawn(name, runtime.handle());
            DeliveryStack {
                context: Arc::new(context),
                _runtime: Some(runtime),
            }
        }
    };

    info!(kind = %config.kind, context = stack.context.name(), "Delivery context ready");
    Ok(stack)
}
