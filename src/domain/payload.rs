//! Typed payloads carried by callback events.
//!
//! Integer codes match the constants of the telephony platform whose
//! callbacks the harness observes, so captured arguments can be compared
//! against the same numbers a platform test would use.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::Value;

/// Connection state as reported by state-changed callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Initializing,
    New,
    Ringing,
    Dialing,
    Active,
    Holding,
    Disconnected,
    PullingCall,
}

impl ConnectionState {
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Initializing => 0,
            Self::New => 1,
            Self::Ringing => 2,
            Self::Dialing => 3,
            Self::Active => 4,
            Self::Holding => 5,
            Self::Disconnected => 6,
            Self::PullingCall => 7,
        }
    }
}

impl From<ConnectionState> for Value {
    fn from(state: ConnectionState) -> Self {
        Value::from(state.code())
    }
}

/// Presentation restriction for addresses and caller names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presentation {
    Allowed,
    Restricted,
    Unknown,
    Payphone,
}

impl Presentation {
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Allowed => 1,
            Self::Restricted => 2,
            Self::Unknown => 3,
            Self::Payphone => 4,
        }
    }
}

impl From<Presentation> for Value {
    fn from(presentation: Presentation) -> Self {
        Value::from(presentation.code())
    }
}

/// Video state bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoState(i32);

impl VideoState {
    pub const AUDIO_ONLY: Self = Self(0);
    pub const TX_ENABLED: Self = Self(1);
    pub const RX_ENABLED: Self = Self(2);
    pub const BIDIRECTIONAL: Self = Self(3);
    pub const PAUSED: Self = Self(4);

    #[must_use]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl fmt::Display for VideoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::AUDIO_ONLY => write!(f, "audio_only"),
            Self::BIDIRECTIONAL => write!(f, "bidirectional"),
            Self::TX_ENABLED => write!(f, "tx"),
            Self::RX_ENABLED => write!(f, "rx"),
            Self(bits) => write!(f, "0x{bits:x}"),
        }
    }
}

impl From<VideoState> for Value {
    fn from(state: VideoState) -> Self {
        Value::from(state.bits())
    }
}

/// A requested or negotiated video configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoProfile {
    pub video_state: VideoState,
    pub quality: i32,
}

impl VideoProfile {
    /// Default quality used when none is requested.
    pub const QUALITY_DEFAULT: i32 = 4;

    #[must_use]
    pub const fn new(video_state: VideoState) -> Self {
        Self {
            video_state,
            quality: Self::QUALITY_DEFAULT,
        }
    }

    #[must_use]
    pub const fn with_quality(video_state: VideoState, quality: i32) -> Self {
        Self {
            video_state,
            quality,
        }
    }
}

impl From<VideoProfile> for Value {
    fn from(profile: VideoProfile) -> Self {
        Value::map([
            ("video_state", Value::from(profile.video_state)),
            ("quality", Value::from(profile.quality)),
        ])
    }
}

/// Camera capability report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraCapabilities {
    pub width: i32,
    pub height: i32,
}

impl CameraCapabilities {
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl From<CameraCapabilities> for Value {
    fn from(caps: CameraCapabilities) -> Self {
        Value::map([("width", caps.width), ("height", caps.height)])
    }
}

/// Status hints shown alongside a connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHints {
    pub label: String,
    pub icon: Option<String>,
}

impl StatusHints {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

impl From<StatusHints> for Value {
    fn from(hints: StatusHints) -> Self {
        Value::map([
            ("label", Value::from(hints.label)),
            ("icon", Value::from(hints.icon)),
        ])
    }
}

/// Why a connection ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisconnectCause {
    pub code: i32,
    pub label: String,
    pub reason: String,
}

impl DisconnectCause {
    pub const UNKNOWN: i32 = 0;
    pub const ERROR: i32 = 1;
    pub const LOCAL: i32 = 2;
    pub const REMOTE: i32 = 3;
    pub const CANCELED: i32 = 4;
    pub const MISSED: i32 = 5;
    pub const REJECTED: i32 = 6;
    pub const BUSY: i32 = 7;

    pub fn new(code: i32, label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code,
            label: label.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn local() -> Self {
        Self::new(Self::LOCAL, "", "")
    }
}

impl From<DisconnectCause> for Value {
    fn from(cause: DisconnectCause) -> Self {
        Value::map([
            ("code", Value::from(cause.code)),
            ("label", Value::from(cause.label)),
            ("reason", Value::from(cause.reason)),
        ])
    }
}

/// Session events raised by a video provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    RxPause,
    RxResume,
    TxStart,
    TxStop,
    CameraFailure,
    CameraReady,
}

impl SessionEvent {
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::RxPause => 1,
            Self::RxResume => 2,
            Self::TxStart => 3,
            Self::TxStop => 4,
            Self::CameraFailure => 5,
            Self::CameraReady => 6,
        }
    }
}

impl From<SessionEvent> for Value {
    fn from(event: SessionEvent) -> Self {
        Value::from(event.code())
    }
}
