//! Callback shapes as a closed tagged union.
//!
//! Each variant of [`CallbackEvent`] corresponds to one callback method of a
//! remote connection or its video provider. [`EventKind`] is the fieldless
//! tag used to declare which shapes a listener wants.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::payload::{
    CameraCapabilities, ConnectionState, DisconnectCause, Presentation, SessionEvent, StatusHints,
    VideoProfile, VideoState,
};
use super::value::{ProxyKind, ProxyRef, Value};

/// Tag of a [`CallbackEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    StateChanged,
    RingbackRequested,
    CapabilitiesChanged,
    PostDialWait,
    PostDialChar,
    VoipAudioChanged,
    StatusHintsChanged,
    AddressChanged,
    CallerDisplayNameChanged,
    VideoStateChanged,
    ConferenceableConnectionsChanged,
    VideoProviderChanged,
    ExtrasChanged,
    Disconnected,
    Destroyed,
    SessionModifyRequestReceived,
    SessionModifyResponseReceived,
    CallSessionEvent,
    PeerDimensionsChanged,
    CallDataUsageChanged,
    CameraCapabilitiesChanged,
    VideoQualityChanged,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 22] = [
        Self::StateChanged,
        Self::RingbackRequested,
        Self::CapabilitiesChanged,
        Self::PostDialWait,
        Self::PostDialChar,
        Self::VoipAudioChanged,
        Self::StatusHintsChanged,
        Self::AddressChanged,
        Self::CallerDisplayNameChanged,
        Self::VideoStateChanged,
        Self::ConferenceableConnectionsChanged,
        Self::VideoProviderChanged,
        Self::ExtrasChanged,
        Self::Disconnected,
        Self::Destroyed,
        Self::SessionModifyRequestReceived,
        Self::SessionModifyResponseReceived,
        Self::CallSessionEvent,
        Self::PeerDimensionsChanged,
        Self::CallDataUsageChanged,
        Self::CameraCapabilitiesChanged,
        Self::VideoQualityChanged,
    ];

    /// The kind of proxy that raises this callback.
    #[must_use]
    pub const fn source(self) -> ProxyKind {
        match self {
            Self::SessionModifyRequestReceived
            | Self::SessionModifyResponseReceived
            | Self::CallSessionEvent
            | Self::PeerDimensionsChanged
            | Self::CallDataUsageChanged
            | Self::CameraCapabilitiesChanged
            | Self::VideoQualityChanged => ProxyKind::VideoProvider,
            _ => ProxyKind::Connection,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StateChanged => "state_changed",
            Self::RingbackRequested => "ringback_requested",
            Self::CapabilitiesChanged => "capabilities_changed",
            Self::PostDialWait => "post_dial_wait",
            Self::PostDialChar => "post_dial_char",
            Self::VoipAudioChanged => "voip_audio_changed",
            Self::StatusHintsChanged => "status_hints_changed",
            Self::AddressChanged => "address_changed",
            Self::CallerDisplayNameChanged => "caller_display_name_changed",
            Self::VideoStateChanged => "video_state_changed",
            Self::ConferenceableConnectionsChanged => "conferenceable_connections_changed",
            Self::VideoProviderChanged => "video_provider_changed",
            Self::ExtrasChanged => "extras_changed",
            Self::Disconnected => "disconnected",
            Self::Destroyed => "destroyed",
            Self::SessionModifyRequestReceived => "session_modify_request_received",
            Self::SessionModifyResponseReceived => "session_modify_response_received",
            Self::CallSessionEvent => "call_session_event",
            Self::PeerDimensionsChanged => "peer_dimensions_changed",
            Self::CallDataUsageChanged => "call_data_usage_changed",
            Self::CameraCapabilitiesChanged => "camera_capabilities_changed",
            Self::VideoQualityChanged => "video_quality_changed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One callback invocation, minus the delivering proxy.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackEvent {
    StateChanged(ConnectionState),
    RingbackRequested(bool),
    CapabilitiesChanged(u32),
    PostDialWait(String),
    PostDialChar(char),
    VoipAudioChanged(bool),
    StatusHintsChanged(StatusHints),
    AddressChanged {
        address: String,
        presentation: Presentation,
    },
    CallerDisplayNameChanged {
        name: String,
        presentation: Presentation,
    },
    VideoStateChanged(VideoState),
    ConferenceableConnectionsChanged(Vec<ProxyRef>),
    VideoProviderChanged(Option<ProxyRef>),
    ExtrasChanged(BTreeMap<String, String>),
    Disconnected(DisconnectCause),
    Destroyed,
    SessionModifyRequestReceived(VideoProfile),
    SessionModifyResponseReceived {
        status: i32,
        requested: VideoProfile,
        response: VideoProfile,
    },
    CallSessionEvent(SessionEvent),
    PeerDimensionsChanged {
        width: i32,
        height: i32,
    },
    CallDataUsageChanged(i64),
    CameraCapabilitiesChanged(CameraCapabilities),
    VideoQualityChanged(i32),
}

impl CallbackEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::StateChanged(_) => EventKind::StateChanged,
            Self::RingbackRequested(_) => EventKind::RingbackRequested,
            Self::CapabilitiesChanged(_) => EventKind::CapabilitiesChanged,
            Self::PostDialWait(_) => EventKind::PostDialWait,
            Self::PostDialChar(_) => EventKind::PostDialChar,
            Self::VoipAudioChanged(_) => EventKind::VoipAudioChanged,
            Self::StatusHintsChanged(_) => EventKind::StatusHintsChanged,
            Self::AddressChanged { .. } => EventKind::AddressChanged,
            Self::CallerDisplayNameChanged { .. } => EventKind::CallerDisplayNameChanged,
            Self::VideoStateChanged(_) => EventKind::VideoStateChanged,
            Self::ConferenceableConnectionsChanged(_) => {
                EventKind::ConferenceableConnectionsChanged
            }
            Self::VideoProviderChanged(_) => EventKind::VideoProviderChanged,
            Self::ExtrasChanged(_) => EventKind::ExtrasChanged,
            Self::Disconnected(_) => EventKind::Disconnected,
            Self::Destroyed => EventKind::Destroyed,
            Self::SessionModifyRequestReceived(_) => EventKind::SessionModifyRequestReceived,
            Self::SessionModifyResponseReceived { .. } => EventKind::SessionModifyResponseReceived,
            Self::CallSessionEvent(_) => EventKind::CallSessionEvent,
            Self::PeerDimensionsChanged { .. } => EventKind::PeerDimensionsChanged,
            Self::CallDataUsageChanged(_) => EventKind::CallDataUsageChanged,
            Self::CameraCapabilitiesChanged(_) => EventKind::CameraCapabilitiesChanged,
            Self::VideoQualityChanged(_) => EventKind::VideoQualityChanged,
        }
    }

    /// Payload arguments in call-site order.
    ///
    /// The delivering proxy is not included; adapters prepend it.
    #[must_use]
    pub fn args(&self) -> Vec<Value> {
        match self {
            Self::StateChanged(state) => vec![Value::from(*state)],
            Self::RingbackRequested(ringback) => vec![Value::from(*ringback)],
            Self::CapabilitiesChanged(caps) => vec![Value::from(*caps)],
            Self::PostDialWait(remaining) => vec![Value::from(remaining.as_str())],
            Self::PostDialChar(next) => vec![Value::from(*next)],
            Self::VoipAudioChanged(voip) => vec![Value::from(*voip)],
            Self::StatusHintsChanged(hints) => vec![Value::from(hints.clone())],
            Self::AddressChanged {
                address,
                presentation,
            } => vec![Value::from(address.as_str()), Value::from(*presentation)],
            Self::CallerDisplayNameChanged { name, presentation } => {
                vec![Value::from(name.as_str()), Value::from(*presentation)]
            }
            Self::VideoStateChanged(state) => vec![Value::from(*state)],
            Self::ConferenceableConnectionsChanged(peers) => {
                vec![Value::List(peers.iter().map(Value::from).collect())]
            }
            Self::VideoProviderChanged(provider) => vec![Value::from(provider.clone())],
            Self::ExtrasChanged(extras) => vec![Value::from(extras.clone())],
            Self::Disconnected(cause) => vec![Value::from(cause.clone())],
            Self::Destroyed => Vec::new(),
            Self::SessionModifyRequestReceived(profile) => vec![Value::from(*profile)],
            Self::SessionModifyResponseReceived {
                status,
                requested,
                response,
            } => vec![
                Value::from(*status),
                Value::from(*requested),
                Value::from(*response),
            ],
            Self::CallSessionEvent(event) => vec![Value::from(*event)],
            Self::PeerDimensionsChanged { width, height } => {
                vec![Value::from(*width), Value::from(*height)]
            }
            Self::CallDataUsageChanged(usage) => vec![Value::from(*usage)],
            Self::CameraCapabilitiesChanged(caps) => vec![Value::from(*caps)],
            Self::VideoQualityChanged(quality) => vec![Value::from(*quality)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_listed_once() {
        let mut kinds = EventKind::ALL.to_vec();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), EventKind::ALL.len());
    }

    #[test]
    fn video_kinds_come_from_video_providers() {
        assert_eq!(EventKind::VideoQualityChanged.source(), ProxyKind::VideoProvider);
        assert_eq!(EventKind::StateChanged.source(), ProxyKind::Connection);
        assert_eq!(EventKind::VideoProviderChanged.source(), ProxyKind::Connection);
    }

    #[test]
    fn args_follow_call_site_order() {
        let event = CallbackEvent::AddressChanged {
            address: "tel:5551212".to_string(),
            presentation: Presentation::Allowed,
        };
        assert_eq!(event.kind(), EventKind::AddressChanged);
        assert_eq!(event.args(), vec![Value::from("tel:5551212"), Value::Int(1)]);
    }

    #[test]
    fn destroyed_has_no_payload() {
        assert!(CallbackEvent::Destroyed.args().is_empty());
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&EventKind::PeerDimensionsChanged).unwrap();
        assert_eq!(json, "\"peer_dimensions_changed\"");
        assert_eq!(EventKind::PeerDimensionsChanged.to_string(), "peer_dimensions_changed");
    }
}
