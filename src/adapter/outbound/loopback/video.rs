//! In-process video provider proxy.

use std::sync::Arc;

use crate::application::{CallbackRegistry, RegistrationGuard};
use crate::domain::{
    CallbackEvent, CameraCapabilities, ListenerId, ProxyKind, ProxyRef, SessionEvent,
    VideoProfile,
};
use crate::error::RegistrationError;
use crate::port::{CallbackListener, DeliveryContext};

/// A video provider whose callbacks are raised by the test itself.
#[derive(Debug)]
pub struct LoopbackVideoProvider {
    registry: CallbackRegistry,
}

impl LoopbackVideoProvider {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            registry: CallbackRegistry::new(ProxyRef::new(ProxyKind::VideoProvider, label)),
        }
    }

    #[must_use]
    pub fn proxy(&self) -> &ProxyRef {
        self.registry.owner()
    }

    #[must_use]
    pub fn registry(&self) -> &CallbackRegistry {
        &self.registry
    }

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

    /// # Errors
    ///
    /// Fails if no such listener is registered.
    pub fn unregister(&self, id: ListenerId) -> Result<(), RegistrationError> {
        self.registry.unregister(id)
    }

    pub fn emit(&self, event: CallbackEvent) -> usize {
        self.registry.dispatch(event)
    }

    pub fn receive_session_modify_request(&self, profile: VideoProfile) -> usize {
        self.emit(CallbackEvent::SessionModifyRequestReceived(profile))
    }

    pub fn receive_session_modify_response(
        &self,
        status: i32,
        requested: VideoProfile,
        response: VideoProfile,
    ) -> usize {
        self.emit(CallbackEvent::SessionModifyResponseReceived {
            status,
            requested,
            response,
        })
    }

    pub fn handle_call_session_event(&self, event: SessionEvent) -> usize {
        self.emit(CallbackEvent::CallSessionEvent(event))
    }

    pub fn change_peer_dimensions(&self, width: i32, height: i32) -> usize {
        self.emit(CallbackEvent::PeerDimensionsChanged { width, height })
    }

    pub fn set_call_data_usage(&self, usage: i64) -> usize {
        self.emit(CallbackEvent::CallDataUsageChanged(usage))
    }

    pub fn change_camera_capabilities(&self, capabilities: CameraCapabilities) -> usize {
        self.emit(CallbackEvent::CameraCapabilitiesChanged(capabilities))
    }

    pub fn change_video_quality(&self, quality: i32) -> usize {
        self.emit(CallbackEvent::VideoQualityChanged(quality))
    }
}
