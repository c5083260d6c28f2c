//! Builders for recorders, adapters and delivery contexts.

use std::sync::Arc;

use crate::adapter::outbound::delivery::{InlineContext, ManualContext, WorkerQueue};
use crate::application::scenario::Fixture;
use crate::application::{CallbackAdapter, InvocationRecorder};
use crate::domain::EventKind;

/// A recorder and an adapter that feeds it.
pub struct Recording {
    pub recorder: Arc<InvocationRecorder>,
    pub adapter: Arc<CallbackAdapter>,
}

/// Recorder plus an adapter accepting every callback kind.
pub fn recording(label: &str) -> Recording {
    let recorder = InvocationRecorder::shared(label);
    let adapter = CallbackAdapter::all(Arc::clone(&recorder)).into_shared();
    Recording { recorder, adapter }
}

/// Recorder plus an adapter accepting only `kind`.
pub fn recording_for(label: &str, kind: EventKind) -> Recording {
    let recorder = InvocationRecorder::shared(label);
    let adapter = CallbackAdapter::for_kind(Arc::clone(&recorder), kind).into_shared();
    Recording { recorder, adapter }
}

/// A started worker queue.
///
/// # Panics
///
/// Panics if the thread cannot be spawned.
pub fn worker(name: &str) -> Arc<WorkerQueue> {
    Arc::new(WorkerQueue::spawn(name).expect("spawn worker queue"))
}

pub fn inline() -> Arc<InlineContext> {
    Arc::new(InlineContext::new())
}

pub fn manual() -> Arc<ManualContext> {
    Arc::new(ManualContext::new("manual"))
}

/// Fresh connection, video provider and peer connection.
pub fn proxies(label: &str) -> Fixture {
    Fixture::new(label)
}
