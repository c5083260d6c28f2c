//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe where callbacks are delivered and who receives
//! them.

pub mod delivery;
pub mod listener;
