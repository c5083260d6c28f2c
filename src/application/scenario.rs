//! Built-in end-to-end scenarios.
//!
//! A scenario registers a recording adapter on a loopback proxy, raises one
//! callback through the proxy's stimulus method and checks that exactly one
//! callback with the expected arguments arrives on the delivery context
//! within the timeout, and no second one follows within the silence window.
//! The `silence` scenario raises nothing and checks that the wait times out.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::adapter::outbound::loopback::{LoopbackConnection, LoopbackVideoProvider};
use crate::application::{CallbackAdapter, CallbackRegistry, InvocationRecorder};
use crate::args;
use crate::domain::{
    CameraCapabilities, ConnectionState, DisconnectCause, EventKind, Presentation, ProxyKind,
    SessionEvent, StatusHints, Value, VideoProfile, VideoState,
};
use crate::error::{Error, Result};
use crate::port::DeliveryContext;

/// Name of the scenario that expects no callback.
pub const SILENCE: &str = "silence";

/// Proxies a scenario acts on.
#[derive(Debug)]
pub struct Fixture {
    pub connection: LoopbackConnection,
    pub video: LoopbackVideoProvider,
    /// Second connection, used as a conference peer.
    pub peer: LoopbackConnection,
}

impl Fixture {
    pub fn new(label: &str) -> Self {
        Self {
            connection: LoopbackConnection::new(format!("{label}/connection")),
            video: LoopbackVideoProvider::new(format!("{label}/video")),
            peer: LoopbackConnection::new(format!("{label}/peer")),
        }
    }

    /// The registry that raises callbacks from proxies of `kind`.
    #[must_use]
    pub fn registry_for(&self, kind: ProxyKind) -> &CallbackRegistry {
        match kind {
            ProxyKind::Connection => self.connection.registry(),
            ProxyKind::VideoProvider => self.video.registry(),
        }
    }
}

type Stimulus = fn(&Fixture) -> usize;
type Expectation = fn(&Fixture) -> Vec<Value>;

/// One named end-to-end check.
#[derive(Clone, Copy)]
pub struct Scenario {
    name: &'static str,
    kind: Option<EventKind>,
    stimulus: Stimulus,
    expected: Expectation,
}

impl Scenario {
    fn callback(kind: EventKind, stimulus: Stimulus, expected: Expectation) -> Self {
        Self {
            name: kind.as_str(),
            kind: Some(kind),
            stimulus,
            expected,
        }
    }

    fn silence() -> Self {
        Self {
            name: SILENCE,
            kind: None,
            stimulus: |_| 0,
            expected: |_| Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Callback kind under test, `None` for the silence check.
    #[must_use]
    pub fn kind(&self) -> Option<EventKind> {
        self.kind
    }

    /// Arguments the adapter should capture for `fixture`.
    #[must_use]
    pub fn expected(&self, fixture: &Fixture) -> Vec<Value> {
        (self.expected)(fixture)
    }

    /// Raise the scenario's callback. Returns the deliveries scheduled.
    pub fn stimulate(&self, fixture: &Fixture) -> usize {
        (self.stimulus)(fixture)
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

fn sample_extras() -> BTreeMap<String, String> {
    BTreeMap::from([("carrier".to_string(), "loopback".to_string())])
}

/// Every built-in scenario: one per callback shape, then `silence`.
#[must_use]
pub fn catalog() -> Vec<Scenario> {
    use EventKind as K;

    vec![
        Scenario::callback(
            K::StateChanged,
            |f| f.connection.set_active(),
            |f| args![f.connection.proxy(), ConnectionState::Active],
        ),
        Scenario::callback(
            K::RingbackRequested,
            |f| f.connection.set_ringback_requested(true),
            |f| args![f.connection.proxy(), true],
        ),
        Scenario::callback(
            K::CapabilitiesChanged,
            |f| f.connection.set_connection_capabilities(42),
            |f| args![f.connection.proxy(), 42_u32],
        ),
        Scenario::callback(
            K::PostDialWait,
            |f| f.connection.set_post_dial_wait("123"),
            |f| args![f.connection.proxy(), "123"],
        ),
        Scenario::callback(
            K::PostDialChar,
            |f| f.connection.set_post_dial_char('#'),
            |f| args![f.connection.proxy(), '#'],
        ),
        Scenario::callback(
            K::VoipAudioChanged,
            |f| f.connection.set_audio_mode_is_voip(true),
            |f| args![f.connection.proxy(), true],
        ),
        Scenario::callback(
            K::StatusHintsChanged,
            |f| f.connection.set_status_hints(StatusHints::new("on hold")),
            |f| args![f.connection.proxy(), StatusHints::new("on hold")],
        ),
        Scenario::callback(
            K::AddressChanged,
            |f| f.connection.set_address("tel:5550100", Presentation::Allowed),
            |f| args![f.connection.proxy(), "tel:5550100", Presentation::Allowed],
        ),
        Scenario::callback(
            K::CallerDisplayNameChanged,
            |f| {
                f.connection
                    .set_caller_display_name("Loopback", Presentation::Restricted)
            },
            |f| args![f.connection.proxy(), "Loopback", Presentation::Restricted],
        ),
        Scenario::callback(
            K::VideoStateChanged,
            |f| f.connection.set_video_state(VideoState::BIDIRECTIONAL),
            |f| args![f.connection.proxy(), VideoState::BIDIRECTIONAL],
        ),
        Scenario::callback(
            K::ConferenceableConnectionsChanged,
            |f| f.connection.set_conferenceable_connections(&[&f.peer]),
            |f| args![f.connection.proxy(), vec![f.peer.proxy()]],
        ),
        Scenario::callback(
            K::VideoProviderChanged,
            |f| f.connection.set_video_provider(Some(&f.video)),
            |f| args![f.connection.proxy(), Some(f.video.proxy())],
        ),
        Scenario::callback(
            K::ExtrasChanged,
            |f| f.connection.put_extras(sample_extras()),
            |f| args![f.connection.proxy(), sample_extras()],
        ),
        Scenario::callback(
            K::Disconnected,
            |f| f.connection.set_disconnected(DisconnectCause::local()),
            |f| args![f.connection.proxy(), DisconnectCause::local()],
        ),
        Scenario::callback(
            K::Destroyed,
            |f| f.connection.destroy(),
            |f| args![f.connection.proxy()],
        ),
        Scenario::callback(
            K::SessionModifyRequestReceived,
            |f| {
                f.video
                    .receive_session_modify_request(VideoProfile::new(VideoState::BIDIRECTIONAL))
            },
            |f| args![f.video.proxy(), VideoProfile::new(VideoState::BIDIRECTIONAL)],
        ),
        Scenario::callback(
            K::SessionModifyResponseReceived,
            |f| {
                f.video.receive_session_modify_response(
                    1,
                    VideoProfile::new(VideoState::BIDIRECTIONAL),
                    VideoProfile::new(VideoState::AUDIO_ONLY),
                )
            },
            |f| {
                args![
                    f.video.proxy(),
                    1,
                    VideoProfile::new(VideoState::BIDIRECTIONAL),
                    VideoProfile::new(VideoState::AUDIO_ONLY),
                ]
            },
        ),
        Scenario::callback(
            K::CallSessionEvent,
            |f| f.video.handle_call_session_event(SessionEvent::RxPause),
            |f| args![f.video.proxy(), SessionEvent::RxPause],
        ),
        Scenario::callback(
            K::PeerDimensionsChanged,
            |f| f.video.change_peer_dimensions(1280, 720),
            |f| args![f.video.proxy(), 1280, 720],
        ),
        Scenario::callback(
            K::CallDataUsageChanged,
            |f| f.video.set_call_data_usage(4_096),
            |f| args![f.video.proxy(), 4_096_i64],
        ),
        Scenario::callback(
            K::CameraCapabilitiesChanged,
            |f| {
                f.video
                    .change_camera_capabilities(CameraCapabilities::new(640, 480))
            },
            |f| args![f.video.proxy(), CameraCapabilities::new(640, 480)],
        ),
        Scenario::callback(
            K::VideoQualityChanged,
            |f| f.video.change_video_quality(42),
            |f| args![f.video.proxy(), 42],
        ),
        Scenario::silence(),
    ]
}

/// Look up scenarios by name, in the order given. An empty list selects the
/// whole catalog.
///
/// # Errors
///
/// Returns [`Error::Scenario`] naming the first unknown scenario.
pub fn select(names: &[String]) -> Result<Vec<Scenario>> {
    let all = catalog();
    if names.is_empty() {
        return Ok(all);
    }
    names
        .iter()
        .map(|name| {
            all.iter()
                .find(|scenario| scenario.name() == name)
                .copied()
                .ok_or_else(|| Error::Scenario(format!("unknown scenario: {name}")))
        })
        .collect()
}

/// Result of one scenario run.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub passed: bool,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

fn serialize_millis<S: Serializer>(
    elapsed: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

/// Runs scenarios against one delivery context.
pub struct ScenarioRunner {
    context: Arc<dyn DeliveryContext>,
    timeout: Duration,
    silence: Duration,
}

impl ScenarioRunner {
    /// `timeout` bounds each expected delivery; `silence` is how long the
    /// runner waits for a callback that must not come (the silence scenario,
    /// or a duplicate after the expected one).
    pub fn new(context: Arc<dyn DeliveryContext>, timeout: Duration, silence: Duration) -> Self {
        Self {
            context,
            timeout,
            silence,
        }
    }

    #[must_use]
    pub fn context(&self) -> &Arc<dyn DeliveryContext> {
        &self.context
    }

    /// Run one scenario on a fresh fixture.
    pub fn run(&self, scenario: &Scenario) -> ScenarioOutcome {
        let started = Instant::now();
        let result = match scenario.kind() {
            Some(kind) => self.check_delivery(scenario, kind),
            None => self.check_silence(scenario),
        };
        let elapsed = started.elapsed();

        match result {
            Ok(()) => {
                debug!(
                    scenario = scenario.name(),
                    elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                    "Scenario passed"
                );
                ScenarioOutcome {
                    name: scenario.name().to_string(),
                    passed: true,
                    elapsed,
                    failure: None,
                }
            }
            Err(e) => {
                warn!(scenario = scenario.name(), error = %e, "Scenario failed");
                ScenarioOutcome {
                    name: scenario.name().to_string(),
                    passed: false,
                    elapsed,
                    failure: Some(e.to_string()),
                }
            }
        }
    }

    /// Run scenarios in order.
    pub fn run_all(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        scenarios.iter().map(|scenario| self.run(scenario)).collect()
    }

    fn check_delivery(&self, scenario: &Scenario, kind: EventKind) -> Result<()> {
        let fixture = Fixture::new(scenario.name());
        let recorder = InvocationRecorder::shared(scenario.name());
        let adapter = CallbackAdapter::for_kind(Arc::clone(&recorder), kind).into_shared();

        let guard = fixture
            .registry_for(kind.source())
            .register_scoped(adapter, Arc::clone(&self.context))?;

        let scheduled = scenario.stimulate(&fixture);
        if scheduled != 1 {
            return Err(Error::Scenario(format!(
                "{}: stimulus scheduled {scheduled} deliveries, expected 1",
                scenario.name()
            )));
        }
        recorder.expect_count(1, self.timeout)?;
        recorder.expect_args(0, &scenario.expected(&fixture))?;

        // A late duplicate shows up within the silence window.
        if recorder.wait_for_count(2, self.silence) {
            return Err(Error::Scenario(format!(
                "{}: expected 1 callback, received {}",
                scenario.name(),
                recorder.received_count()
            )));
        }

        guard.release()?;
        Ok(())
    }

    fn check_silence(&self, scenario: &Scenario) -> Result<()> {
        let fixture = Fixture::new(scenario.name());
        let recorder = InvocationRecorder::shared(scenario.name());
        let adapter = CallbackAdapter::all(Arc::clone(&recorder)).into_shared();

        let guard = fixture
            .connection
            .register_scoped(adapter, Arc::clone(&self.context))?;

        scenario.stimulate(&fixture);
        if recorder.wait_for_count(1, self.silence) {
            return Err(Error::Scenario(format!(
                "{}: unexpected callback {:?}",
                scenario.name(),
                recorder.args_at(0).unwrap_or_default()
            )));
        }

        guard.release()?;
        Ok(())
    }
}

impl std::fmt::Debug for ScenarioRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioRunner")
            .field("context", &self.context.name())
            .field("timeout", &self.timeout)
            .field("silence", &self.silence)
            .finish()
    }
}
