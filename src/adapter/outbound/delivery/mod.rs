//! Delivery context implementations.
//!
//! - [`WorkerQueue`]: dedicated named OS thread, FIFO. Deliveries never run
//!   on the stimulus thread.
//! - [`InlineContext`]: runs the callback on the calling thread.
//! - [`ManualContext`]: queues callbacks until the test drains them.
//! - [`TokioContext`]: a single task on a tokio runtime drains a channel.

mod inline;
mod manual;
mod runtime;
mod worker;

use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use crate::port::DeliveryTask;

pub use inline::InlineContext;
pub use manual::ManualContext;
pub use runtime::TokioContext;
pub use worker::WorkerQueue;

/// Run `task`. A panic is logged and does not reach the caller.
pub(crate) fn run_contained(context: &str, task: DeliveryTask) {
    if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
        warn!(context, "Callback delivery panicked");
    }
}
