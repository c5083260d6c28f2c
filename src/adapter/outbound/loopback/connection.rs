//! In-process connection proxy.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::{CallbackRegistry, RegistrationGuard};
use crate::domain::{
    CallbackEvent, ConnectionState, DisconnectCause, ListenerId, Presentation, ProxyKind,
    ProxyRef, StatusHints, VideoState,
};
use crate::error::RegistrationError;
use crate::port::{CallbackListener, DeliveryContext};

use super::LoopbackVideoProvider;

/// A connection whose callbacks are raised by the test itself.
///
/// Every stimulus method emits exactly one event to the registered listeners
/// and returns how many deliveries were scheduled.
#[derive(Debug)]
pub struct LoopbackConnection {
    registry: CallbackRegistry,
}

impl LoopbackConnection {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            registry: CallbackRegistry::new(ProxyRef::new(ProxyKind::Connection, label)),
        }
    }

    /// Identity handle delivered as the first callback argument.
    #[must_use]
    pub fn proxy(&self) -> &ProxyRef {
        self.registry.owner()
    }

    #[must_use]
    pub fn registry(&self) -> &CallbackRegistry {
        &self.registry
    }

    /// See [`CallbackRegistry::register`].
    ///
    /// # Errors
    ///
    /// Fails if the listener is already registered.
    pub fn register(
        &self,
        listener: Arc<dyn CallbackListener>,
        context: Arc<dyn DeliveryContext>,
    ) -> Result<(), RegistrationError> {
        self.registry.register(listener, context)
    }

    /// See [`CallbackRegistry::register_scoped`].
    ///
    /// # Errors
    ///
    /// Fails if the listener is already registered.
    pub fn register_scoped(
        &self,
        listener: Arc<dyn CallbackListener>,
        context: Arc<dyn DeliveryContext>,
    ) -> Result<RegistrationGuard<'_>, RegistrationError> {
        self.registry.register_scoped(listener, context)
    }

    /// See [`CallbackRegistry::unregister`].
    ///
    /// # Errors
    ///
    /// Fails if no such listener is registered.
    pub fn unregister(&self, id: ListenerId) -> Result<(), RegistrationError> {
        self.registry.unregister(id)
    }

    pub fn emit(&self, event: CallbackEvent) -> usize {
        self.registry.dispatch(event)
    }

    pub fn set_state(&self, state: ConnectionState) -> usize {
        self.emit(CallbackEvent::StateChanged(state))
    }

    pub fn set_active(&self) -> usize {
        self.set_state(ConnectionState::Active)
    }

    pub fn set_ringback_requested(&self, ringback: bool) -> usize {
        self.emit(CallbackEvent::RingbackRequested(ringback))
    }

    pub fn set_connection_capabilities(&self, capabilities: u32) -> usize {
        self.emit(CallbackEvent::CapabilitiesChanged(capabilities))
    }

    pub fn set_post_dial_wait(&self, remaining: impl Into<String>) -> usize {
        self.emit(CallbackEvent::PostDialWait(remaining.into()))
    }

    pub fn set_post_dial_char(&self, next: char) -> usize {
        self.emit(CallbackEvent::PostDialChar(next))
    }

    pub fn set_audio_mode_is_voip(&self, voip: bool) -> usize {
        self.emit(CallbackEvent::VoipAudioChanged(voip))
    }

    pub fn set_status_hints(&self, hints: StatusHints) -> usize {
        self.emit(CallbackEvent::StatusHintsChanged(hints))
    }

    pub fn set_address(&self, address: impl Into<String>, presentation: Presentation) -> usize {
        self.emit(CallbackEvent::AddressChanged {
            address: address.into(),
            presentation,
        })
    }

    pub fn set_caller_display_name(
        &self,
        name: impl Into<String>,
        presentation: Presentation,
    ) -> usize {
        self.emit(CallbackEvent::CallerDisplayNameChanged {
            name: name.into(),
            presentation,
        })
    }

    pub fn set_video_state(&self, state: VideoState) -> usize {
        self.emit(CallbackEvent::VideoStateChanged(state))
    }

    /// Announce the connections this one may be conferenced with.
    pub fn set_conferenceable_connections(&self, peers: &[&LoopbackConnection]) -> usize {
        let peers = peers.iter().map(|peer| peer.proxy().clone()).collect();
        self.emit(CallbackEvent::ConferenceableConnectionsChanged(peers))
    }

    /// Attach a video provider, or detach with `None`.
    pub fn set_video_provider(&self, provider: Option<&LoopbackVideoProvider>) -> usize {
        let provider = provider.map(|provider| provider.proxy().clone());
        self.emit(CallbackEvent::VideoProviderChanged(provider))
    }

    pub fn put_extras(&self, extras: BTreeMap<String, String>) -> usize {
        self.emit(CallbackEvent::ExtrasChanged(extras))
    }

    pub fn set_disconnected(&self, cause: DisconnectCause) -> usize {
        self.emit(CallbackEvent::Disconnected(cause))
    }

    pub fn destroy(&self) -> usize {
        self.emit(CallbackEvent::Destroyed)
    }
}
