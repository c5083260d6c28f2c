//! Outbound adapters (driven side).

pub mod delivery;
pub mod loopback;
