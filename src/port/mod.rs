//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Recorder + Registry    ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                                                       ▼
//! ┌──────────────────┐                              ┌──────────────────┐
//! │ DeliveryContext  │                              │ CallbackListener │
//! │ worker / inline  │                              │ CallbackAdapter  │
//! │ manual / tokio   │                              │                  │
//! └──────────────────┘                              └──────────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`DeliveryContext`] - Where callback deliveries execute
//! - [`CallbackListener`] - Who receives them

pub mod outbound;

pub use outbound::delivery::{DeliveryContext, DeliveryTask};
pub use outbound::listener::CallbackListener;
