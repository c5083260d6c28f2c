//! Immutable snapshot of one observed invocation.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::value::Value;

/// The arguments of one callback invocation, in call-site order.
///
/// Cloning shares the argument storage. Metadata (`index`, `received_at`,
/// `thread`) is diagnostic and does not take part in argument comparisons.
#[derive(Debug, Clone)]
pub struct InvocationRecord {
    index: usize,
    args: Arc<[Value]>,
    received_at: DateTime<Utc>,
    thread: Option<String>,
}

impl InvocationRecord {
    /// Snapshot `args` as the invocation at position `index`, stamped with
    /// the current time and the name of the calling thread.
    #[must_use]
    pub fn capture(index: usize, args: Vec<Value>) -> Self {
        Self {
            index,
            args: args.into(),
            received_at: Utc::now(),
            thread: std::thread::current().name().map(str::to_string),
        }
    }

    /// Position in delivery order (0-based).
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Argument at `position`, if present.
    #[must_use]
    pub fn arg(&self, position: usize) -> Option<&Value> {
        self.args.get(position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    #[must_use]
    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Name of the thread that recorded the invocation, if it had one.
    #[must_use]
    pub fn thread(&self) -> Option<&str> {
        self.thread.as_deref()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> {
        self.args.to_vec()
    }
}
