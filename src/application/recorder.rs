//! Thread-safe invocation recorder with a blocking wait-for-count.
//!
//! Deliveries append records from any thread; a test thread blocks in
//! [`InvocationRecorder::wait_for_count`] until enough have arrived or the
//! timeout expires. One mutex and one condition variable guard all state:
//! the waiter checks the count under the lock before every wait, so a record
//! that lands between "check" and "sleep" cannot be missed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace, warn};

use crate::domain::{InvocationRecord, Value};
use crate::error::RecorderError;

/// Append-only log of callback invocations.
///
/// The received count is the length of the log, so a reader can always index
/// every invocation it has been told about.
pub struct InvocationRecorder {
    label: String,
    records: Mutex<Vec<InvocationRecord>>,
    arrived: Condvar,
}

impl InvocationRecorder {
    /// Create an empty recorder. The label only appears in logs and errors.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            records: Mutex::new(Vec::new()),
            arrived: Condvar::new(),
        }
    }

    /// Create an empty recorder behind an `Arc`, ready to hand to adapters.
    pub fn shared(label: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(label))
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Append one invocation and wake every waiter.
    pub fn record(&self, args: Vec<Value>) {
        let index = {
            let mut records = self.records.lock();
            let index = records.len();
            records.push(InvocationRecord::capture(index, args));
            index
        };
        self.arrived.notify_all();
        debug!(label = %self.label, index, "Invocation recorded");
    }

    /// Number of invocations received so far. Never decreases.
    #[must_use]
    pub fn received_count(&self) -> usize {
        self.records.lock().len()
    }

    /// Block until at least `count` invocations have been received or
    /// `timeout` elapses.
    ///
    /// Returns `true` as soon as the count is reached (immediately if it
    /// already was) and `false` on timeout. A timeout leaves the recorder
    /// untouched.
    pub fn wait_for_count(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        let mut records = self.records.lock();
        trace!(
            label = %self.label,
            expected = count,
            received = records.len(),
            "Waiting for invocations"
        );

        while records.len() < count {
            match deadline {
                Some(deadline) => {
                    if self.arrived.wait_until(&mut records, deadline).timed_out() {
                        break;
                    }
                }
                None => self.arrived.wait(&mut records),
            }
        }

        let reached = records.len() >= count;
        trace!(
            label = %self.label,
            expected = count,
            received = records.len(),
            reached,
            "Wait finished"
        );
        reached
    }

    /// Like [`wait_for_count`](Self::wait_for_count), but a timeout becomes
    /// a [`RecorderError::Timeout`] that says how many invocations did arrive.
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::Timeout`] if the count was not reached in time.
    pub fn expect_count(&self, count: usize, timeout: Duration) -> Result<(), RecorderError> {
        let started = Instant::now();
        if self.wait_for_count(count, timeout) {
            return Ok(());
        }

        let error = RecorderError::Timeout {
            label: self.label.clone(),
            expected: count,
            received: self.received_count(),
            waited: started.elapsed(),
        };
        warn!(error = %error, "Expected invocations did not arrive");
        Err(error)
    }

    /// Arguments of the invocation at `index` (0-based, delivery order).
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::OutOfRange`] if fewer than `index + 1`
    /// invocations have been received.
    pub fn args_at(&self, index: usize) -> Result<Vec<Value>, RecorderError> {
        self.record_at(index).map(|record| record.to_vec())
    }

    /// Full record of the invocation at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::OutOfRange`] if `index >= received_count()`.
    pub fn record_at(&self, index: usize) -> Result<InvocationRecord, RecorderError> {
        let records = self.records.lock();
        records
            .get(index)
            .cloned()
            .ok_or_else(|| RecorderError::OutOfRange {
                label: self.label.clone(),
                index,
                received: records.len(),
            })
    }

    /// Check that invocation `index` carried exactly `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::OutOfRange`] if that invocation has not
    /// arrived, or [`RecorderError::Mismatch`] if its arguments differ.
    pub fn expect_args(&self, index: usize, expected: &[Value]) -> Result<(), RecorderError> {
        let actual = self.args_at(index)?;
        if actual.as_slice() == expected {
            return Ok(());
        }
        Err(RecorderError::Mismatch {
            label: self.label.clone(),
            index,
            expected: expected.to_vec(),
            actual,
        })
    }

    /// Copy of every record received so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<InvocationRecord> {
        self.records.lock().clone()
    }
}

impl std::fmt::Debug for InvocationRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocationRecorder")
            .field("label", &self.label)
            .field("received", &self.received_count())
            .finish()
    }
}
