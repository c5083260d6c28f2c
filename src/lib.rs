//! callback-harness - correlate asynchronously delivered callbacks with
//! blocking, timeout-bounded waits.
//!
//! A test raises a stimulus on one thread while the system under test reports
//! back through callbacks on another. The harness records every callback with
//! its arguments and lets the test block until a number of invocations has
//! arrived, then inspect them by index.
//!
//! # Architecture
//!
//! - **`domain`** - Argument values, callback shapes, invocation records
//! - **`port`** - Listener and delivery-context traits
//! - **`application`** - Invocation recorder, callback adapter, registration
//!   list, and the built-in scenario catalog
//! - **`adapter`** - Delivery contexts (worker thread, inline, manual, tokio),
//!   loopback proxies, and the CLI
//! - **`infrastructure`** - Configuration and component factories
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use callback_harness::adapter::outbound::delivery::WorkerQueue;
//! use callback_harness::adapter::outbound::loopback::LoopbackVideoProvider;
//! use callback_harness::application::{CallbackAdapter, InvocationRecorder};
//! use callback_harness::args;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = LoopbackVideoProvider::new("video");
//! let recorder = InvocationRecorder::shared("quality");
//! let adapter = CallbackAdapter::all(Arc::clone(&recorder)).into_shared();
//!
//! provider.register(adapter.clone(), Arc::new(WorkerQueue::spawn("CallbackThread")?))?;
//! provider.change_video_quality(42);
//!
//! assert!(recorder.wait_for_count(1, Duration::from_secs(5)));
//! recorder.expect_args(0, &args![provider.proxy(), 42])?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use error::{Error, Result};
