//! Infrastructure layer.
//!
//! Technical concerns that support the harness without containing its
//! synchronization logic: configuration loading and the construction of
//! delivery contexts from it.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation
//! - [`factory`] - Component factory functions

pub mod config;
pub mod factory;
