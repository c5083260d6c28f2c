//! Loopback proxies: stimulus sources that raise callbacks in-process.
//!
//! Each proxy owns a [`CallbackRegistry`](crate::application::CallbackRegistry)
//! and exposes one method per callback shape it can raise.

mod connection;
mod video;

pub use connection::LoopbackConnection;
pub use video::LoopbackVideoProvider;
