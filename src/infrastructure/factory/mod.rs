//! Factory modules for building infrastructure components.
//!
//! # Submodules
//!
//! - [`delivery`] - Delivery context construction

pub mod delivery;
