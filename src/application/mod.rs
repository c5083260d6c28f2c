//! Application services (use cases).
//!
//! These services hold the harness's synchronization and coordinate
//! listeners with delivery contexts.

pub mod adapter;
pub mod recorder;
pub mod registry;
pub mod scenario;

pub use adapter::{CallbackAdapter, KindFilter};
pub use recorder::InvocationRecorder;
pub use registry::{CallbackRegistry, RegistrationGuard};
pub use scenario::{Scenario, ScenarioOutcome, ScenarioRunner};
