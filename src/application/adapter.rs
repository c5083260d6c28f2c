//! Generic callback-to-recorder adapter.
//!
//! One adapter covers every callback shape: it prepends the delivering proxy
//! to the event's payload and records the result. It never filters content,
//! transforms values or asserts anything.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::{CallbackEvent, EventKind, ListenerId, ProxyRef, Value};
use crate::port::CallbackListener;

use super::recorder::InvocationRecorder;

/// Which callback kinds an adapter listens for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindFilter {
    /// Every callback kind.
    All,
    /// Only the listed kinds.
    Only(BTreeSet<EventKind>),
}

impl KindFilter {
    #[must_use]
    pub fn matches(&self, kind: EventKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(kinds) => kinds.contains(&kind),
        }
    }
}

/// Listener that forwards callback arguments into an [`InvocationRecorder`].
#[derive(Debug)]
pub struct CallbackAdapter {
    id: ListenerId,
    recorder: Arc<InvocationRecorder>,
    kinds: KindFilter,
}

impl CallbackAdapter {
    /// Listen for every callback kind.
    #[must_use]
    pub fn all(recorder: Arc<InvocationRecorder>) -> Self {
        Self {
            id: ListenerId::next(),
            recorder,
            kinds: KindFilter::All,
        }
    }

    /// Listen only for `kinds`.
    pub fn for_kinds(
        recorder: Arc<InvocationRecorder>,
        kinds: impl IntoIterator<Item = EventKind>,
    ) -> Self {
        Self {
            id: ListenerId::next(),
            recorder,
            kinds: KindFilter::Only(kinds.into_iter().collect()),
        }
    }

    /// Listen for a single kind.
    #[must_use]
    pub fn for_kind(recorder: Arc<InvocationRecorder>, kind: EventKind) -> Self {
        Self::for_kinds(recorder, [kind])
    }

    #[must_use]
    pub fn recorder(&self) -> &Arc<InvocationRecorder> {
        &self.recorder
    }

    #[must_use]
    pub fn kinds(&self) -> &KindFilter {
        &self.kinds
    }

    /// Wrap in an `Arc` for registration.
    #[must_use]
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl CallbackListener for CallbackAdapter {
    fn id(&self) -> ListenerId {
        self.id
    }

    fn accepts(&self, kind: EventKind) -> bool {
        self.kinds.matches(kind)
    }

    fn on_callback(&self, source: &ProxyRef, event: &CallbackEvent) {
        let mut args = Vec::with_capacity(4);
        args.push(Value::from(source));
        args.extend(event.args());
        self.recorder.record(args);
    }
}
