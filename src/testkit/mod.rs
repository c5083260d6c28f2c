//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`fixture`]: recorders with attached adapters, delivery contexts, and
//!   loopback proxies.
//! - [`config`]: canonical test configurations with short waits.

pub mod config;
pub mod fixture;
