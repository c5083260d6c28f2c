//! Platform-free harness types: argument values, callback shapes, records.
//!
//! Everything here is plain data. Synchronization lives in
//! [`crate::application`].

pub mod event;
pub mod id;
pub mod payload;
pub mod record;
pub mod value;

pub use event::{CallbackEvent, EventKind};
pub use id::{ListenerId, ProxyId};
pub use payload::{
    CameraCapabilities, ConnectionState, DisconnectCause, Presentation, SessionEvent, StatusHints,
    VideoProfile, VideoState,
};
pub use record::InvocationRecord;
pub use value::{ProxyKind, ProxyRef, Value};
