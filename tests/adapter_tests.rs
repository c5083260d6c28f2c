//! End-to-end delivery: loopback proxy -> registry -> delivery context ->
//! adapter -> recorder.

mod support;

use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use callback_harness::adapter::outbound::delivery::TokioContext;
use callback_harness::adapter::outbound::loopback::{LoopbackConnection, LoopbackVideoProvider};
use callback_harness::application::CallbackAdapter;
use callback_harness::args;
use callback_harness::domain::{
    CallbackEvent, ConnectionState, EventKind, ListenerId, ProxyRef, Value,
};
use callback_harness::error::RegistrationError;
use callback_harness::port::{CallbackListener, DeliveryContext};
use callback_harness::testkit::fixture;

use support::assertions::{assert_duration_near, current_thread_name};

const TIMEOUT: Duration = Duration::from_secs(5);

#[test]
fn capabilities_arrive_on_worker_thread() {
    let connection = LoopbackConnection::new("e2e");
    let recording = fixture::recording("capabilities");
    let worker = fixture::worker("CallbackThread");

    connection
        .register(recording.adapter.clone(), worker.clone())
        .unwrap();

    let started = Instant::now();
    assert_eq!(connection.set_connection_capabilities(42), 1);
    assert!(recording.recorder.wait_for_count(1, TIMEOUT));
    assert!(started.elapsed() < Duration::from_secs(1));

    assert_eq!(
        recording.recorder.args_at(0).unwrap(),
        args![connection.proxy(), 42_u32]
    );
    let record = recording.recorder.record_at(0).unwrap();
    assert_eq!(record.thread(), Some("CallbackThread"));
    assert_ne!(record.thread(), current_thread_name().as_deref());

    connection.unregister(recording.adapter.id()).unwrap();
    assert!(connection.registry().is_empty());
}

#[test]
fn video_quality_arrives_with_provider_first() {
    let provider = LoopbackVideoProvider::new("video-e2e");
    let recording = fixture::recording_for("quality", EventKind::VideoQualityChanged);
    let worker = fixture::worker("CallbackThread");

    provider
        .register(recording.adapter.clone(), worker)
        .unwrap();
    provider.change_peer_dimensions(1, 1);
    provider.change_video_quality(42);

    assert!(recording.recorder.wait_for_count(1, TIMEOUT));
    recording
        .recorder
        .expect_args(0, &args![provider.proxy(), 42])
        .unwrap();
    assert_eq!(recording.recorder.received_count(), 1);
}

#[test]
fn silence_times_out_after_the_window() {
    let connection = LoopbackConnection::new("quiet");
    let recording = fixture::recording("silence");
    connection
        .register(recording.adapter.clone(), fixture::worker("CallbackThread"))
        .unwrap();

    let window = Duration::from_millis(200);
    let started = Instant::now();
    assert!(!recording.recorder.wait_for_count(1, window));
    assert_duration_near(
        started.elapsed(),
        window,
        Duration::ZERO,
        Duration::from_millis(500),
    );
    assert!(recording.recorder.args_at(0).is_err());
}

#[test]
fn worker_delivers_in_stimulus_order() {
    let connection = LoopbackConnection::new("fifo");
    let recording = fixture::recording_for("digits", EventKind::PostDialChar);
    connection
        .register(recording.adapter.clone(), fixture::worker("CallbackThread"))
        .unwrap();

    let digits: Vec<char> = "0123456789*#".chars().collect();
    for digit in &digits {
        connection.set_post_dial_char(*digit);
    }

    assert!(recording.recorder.wait_for_count(digits.len(), TIMEOUT));
    for (index, digit) in digits.iter().enumerate() {
        assert_eq!(
            recording.recorder.args_at(index).unwrap()[1],
            Value::Char(*digit)
        );
    }
}

#[test]
fn each_listener_gets_its_own_context() {
    let connection = LoopbackConnection::new("fan-out");
    let first = fixture::recording("first");
    let second = fixture::recording("second");
    connection
        .register(first.adapter.clone(), fixture::worker("FirstThread"))
        .unwrap();
    connection
        .register(second.adapter.clone(), fixture::worker("SecondThread"))
        .unwrap();

    assert_eq!(connection.set_ringback_requested(true), 2);

    assert!(first.recorder.wait_for_count(1, TIMEOUT));
    assert!(second.recorder.wait_for_count(1, TIMEOUT));
    assert_eq!(
        first.recorder.record_at(0).unwrap().thread(),
        Some("FirstThread")
    );
    assert_eq!(
        second.recorder.record_at(0).unwrap().thread(),
        Some("SecondThread")
    );
}

#[test]
fn registration_misuse_fails_fast() {
    let connection = LoopbackConnection::new("misuse");
    let recording = fixture::recording("misuse");
    let context: Arc<dyn DeliveryContext> = fixture::inline();

    connection
        .register(recording.adapter.clone(), Arc::clone(&context))
        .unwrap();
    assert!(matches!(
        connection.register(recording.adapter.clone(), context),
        Err(RegistrationError::AlreadyRegistered { .. })
    ));

    connection.unregister(recording.adapter.id()).unwrap();
    assert!(matches!(
        connection.unregister(recording.adapter.id()),
        Err(RegistrationError::NotRegistered { .. })
    ));
}

#[test]
fn scoped_registration_stops_deliveries_after_drop() {
    let connection = LoopbackConnection::new("scoped");
    let recording = fixture::recording("scoped");

    {
        let _guard = connection
            .register_scoped(recording.adapter.clone(), fixture::inline())
            .unwrap();
        connection.destroy();
    }
    connection.destroy();

    assert_eq!(recording.recorder.received_count(), 1);
    assert!(!connection.registry().is_registered(recording.adapter.id()));
}

#[test]
fn shut_down_worker_drops_deliveries() {
    let connection = LoopbackConnection::new("closed");
    let recording = fixture::recording("closed");
    let worker = fixture::worker("ClosedThread");
    connection
        .register(recording.adapter.clone(), worker.clone())
        .unwrap();

    worker.shutdown();

    assert_eq!(connection.set_active(), 0);
    assert!(!recording.recorder.wait_for_count(1, Duration::from_millis(50)));
}

#[test]
fn tokio_context_delivers_off_the_test_thread() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("TokioCallback")
        .build()
        .unwrap();
    let context = Arc::new(TokioContext::spawn("tokio", runtime.handle()));

    let connection = LoopbackConnection::new("tokio");
    let recording = fixture::recording("tokio");
    connection
        .register(recording.adapter.clone(), context)
        .unwrap();
    connection.set_audio_mode_is_voip(true);

    assert!(recording.recorder.wait_for_count(1, TIMEOUT));
    assert_eq!(
        recording.recorder.record_at(0).unwrap().thread(),
        Some("TokioCallback")
    );
}

/// Listener that removes itself from its connection on first delivery.
struct OneShot {
    id: ListenerId,
    connection: OnceLock<Arc<LoopbackConnection>>,
    inner: Arc<CallbackAdapter>,
}

impl CallbackListener for OneShot {
    fn id(&self) -> ListenerId {
        self.id
    }

    fn accepts(&self, kind: EventKind) -> bool {
        self.inner.accepts(kind)
    }

    fn on_callback(&self, source: &ProxyRef, event: &CallbackEvent) {
        self.inner.on_callback(source, event);
        if let Some(connection) = self.connection.get() {
            connection.unregister(self.id).unwrap();
        }
    }
}

#[test]
fn listener_can_unregister_from_inside_a_delivery() {
    let connection = Arc::new(LoopbackConnection::new("reentrant"));
    let recording = fixture::recording("reentrant");
    let listener = Arc::new(OneShot {
        id: ListenerId::next(),
        connection: OnceLock::new(),
        inner: recording.adapter.clone(),
    });
    let _ = listener.connection.set(Arc::clone(&connection));

    connection
        .register(listener.clone(), fixture::inline())
        .unwrap();
    connection.set_state(ConnectionState::Holding);
    connection.set_state(ConnectionState::Active);

    assert_eq!(recording.recorder.received_count(), 1);
    assert!(connection.registry().is_empty());
}
