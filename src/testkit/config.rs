//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::infrastructure::config::delivery::{DeliveryConfig, DeliveryKind};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::wait::WaitConfig;

/// Name given to delivery threads built from test configs.
pub const TEST_THREAD: &str = "TestCallbackThread";

/// Short waits so failing tests fail fast.
pub fn wait() -> WaitConfig {
    WaitConfig {
        timeout_ms: 2_000,
        silence_ms: 50,
    }
}

/// Config that delivers on `kind` with [`wait`] timings.
pub fn with_delivery(kind: DeliveryKind) -> Config {
    Config {
        wait: wait(),
        delivery: DeliveryConfig {
            kind,
            thread_name: TEST_THREAD.to_string(),
        },
        ..Config::default()
    }
}

/// Worker-thread config with [`wait`] timings.
pub fn fast() -> Config {
    with_delivery(DeliveryKind::Worker)
}
