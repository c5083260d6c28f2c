//! Infrastructure configuration modules.

pub mod delivery;
pub mod logging;
pub mod settings;
pub mod wait;
