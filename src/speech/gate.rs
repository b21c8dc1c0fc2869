use futures::future::AbortHandle;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use tracing::debug;

static NEXT_LEASE_ID: AtomicU64 = AtomicU64::new(1);

static GLOBAL_GATE: OnceLock<Arc<SpeechGate>> = OnceLock::new();

struct LaneOwner {
    lease_id: u64,
    abort: AbortHandle,
}

/// One exclusive lane of a shared speech resource.
///
/// At most one holder at a time. Acquiring a busy lane preempts the current
/// holder by aborting its task; dropping its in-flight future releases the
/// lane via [`LaneLease`].
pub struct Lane {
    name: &'static str,
    slot: Mutex<Option<LaneOwner>>,
}

impl Lane {
    fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            slot: Mutex::new(None),
        })
    }

    /// Take the lane, preempting any current holder. `abort` must cancel the
    /// task that will hold the returned lease.
    pub fn acquire(self: &Arc<Self>, abort: AbortHandle) -> LaneLease {
        let lease_id = NEXT_LEASE_ID.fetch_add(1, Ordering::Relaxed);
        let mut slot = self.slot.lock().unwrap();
        if let Some(prev) = slot.take() {
            debug!(lane = self.name, "preempting current lane holder");
            prev.abort.abort();
        }
        *slot = Some(LaneOwner { lease_id, abort });
        LaneLease {
            lane: Arc::clone(self),
            lease_id,
        }
    }

    /// Whether some session currently holds the lane
    pub fn is_busy(&self) -> bool {
        self.slot.lock().unwrap().is_some()
    }
}

/// Scoped ownership of a [`Lane`]. Releases the lane on drop, on every exit
/// path: natural completion, error, cancellation, or preemption.
pub struct LaneLease {
    lane: Arc<Lane>,
    lease_id: u64,
}

impl Drop for LaneLease {
    fn drop(&mut self) {
        let mut slot = self.lane.slot.lock().unwrap();
        // A preempting acquirer has already replaced the owner; only clear
        // the slot if this lease still holds it.
        if slot.as_ref().map(|o| o.lease_id) == Some(self.lease_id) {
            *slot = None;
        }
    }
}

/// Process-wide mutual exclusion for the speech hardware: one active listen
/// and one audible utterance at any time, across all controllers.
pub struct SpeechGate {
    capture: Arc<Lane>,
    playback: Arc<Lane>,
}

impl SpeechGate {
    /// A private gate, for tests that must not share lanes with each other
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            capture: Lane::new("capture"),
            playback: Lane::new("playback"),
        })
    }

    /// The shared process-wide gate
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL_GATE.get_or_init(Self::new))
    }

    pub fn capture(&self) -> &Arc<Lane> {
        &self.capture
    }

    pub fn playback(&self) -> &Arc<Lane> {
        &self.playback
    }
}
