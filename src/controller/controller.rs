use super::state::{ControllerState, ErrorKind, InteractionMode, VoiceEvent};
use crate::locale::{Language, LocaleResolver, LocaleTag};
use crate::responses::ResponseSelector;
use crate::session::{
    CaptureEvent, CaptureSession, PlaybackEvent, PlaybackSession, SessionSnapshot,
};
use crate::speech::{CaptureError, SpeakParams, SpeechGate, SpeechRecognizer, SpeechSynthesizer};
use chrono::{DateTime, Utc};
use futures::future::AbortHandle;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Controller settings, usually derived from [`VoiceConfig`](crate::config::VoiceConfig)
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Listening window before a capture attempt fails; `None` waits
    /// indefinitely
    pub listen_timeout: Option<Duration>,

    /// Prosody for spoken replies
    pub speak_params: SpeakParams,

    /// Language-to-locale mapping
    pub resolver: LocaleResolver,

    /// Fixed seed for response selection; `None` seeds from entropy
    pub response_seed: Option<u64>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            listen_timeout: Some(Duration::from_secs(8)),
            speak_params: SpeakParams::default(),
            resolver: LocaleResolver::new(),
            response_seed: None,
        }
    }
}

/// Mutable controller bookkeeping, all behind one lock.
///
/// `generation` is bumped by every activation and every `deactivate()`; a
/// driver task may only mutate state or emit events while its generation is
/// current, which is what makes `deactivate()` synchronous: after the bump
/// no stale task can reach the consumer.
struct Slot {
    generation: u64,
    state: ControllerState,
    session_id: Option<Uuid>,
    started_at: Option<DateTime<Utc>>,
    mode: Option<InteractionMode>,
    language: Option<Language>,
    last_transcript: Option<String>,
    last_error: Option<ErrorKind>,
    /// Abort handle of the in-flight sub-session, held only while it lives
    active: Option<AbortHandle>,
    activations: u64,
}

struct Inner {
    recognizer: Arc<dyn SpeechRecognizer>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    gate: Arc<SpeechGate>,
    selector: Mutex<ResponseSelector>,
    config: ControllerConfig,
    supported: bool,
    events: mpsc::UnboundedSender<VoiceEvent>,
    slot: Mutex<Slot>,
}

/// Orchestrates speech capture and reply playback into one user-facing
/// session.
///
/// `activate` opens a capture sub-session and returns immediately; all
/// further progress happens in response to sub-session terminal events, so
/// consumers must treat [`VoiceEvent`] delivery as asynchronous. At most one
/// session is active per controller; activating while busy cancels the
/// previous session first.
pub struct VoiceController {
    inner: Arc<Inner>,
}

impl VoiceController {
    /// Controller over the process-wide speech gate.
    ///
    /// Returns the controller and the consumer's event stream.
    pub fn new(
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        config: ControllerConfig,
    ) -> (Self, mpsc::UnboundedReceiver<VoiceEvent>) {
        Self::with_gate(recognizer, synthesizer, config, SpeechGate::global())
    }

    /// Controller over an explicit gate, for tests that need isolated lanes
    pub fn with_gate(
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        config: ControllerConfig,
        gate: Arc<SpeechGate>,
    ) -> (Self, mpsc::UnboundedReceiver<VoiceEvent>) {
        let supported = recognizer.is_available();
        if !supported {
            warn!(
                recognizer = recognizer.name(),
                "speech capture unavailable, voice interaction disabled"
            );
        }

        let selector = match config.response_seed {
            Some(seed) => ResponseSelector::with_seed(seed),
            None => ResponseSelector::new(),
        };

        let (tx, rx) = mpsc::unbounded_channel();
        let inner = Arc::new(Inner {
            recognizer,
            synthesizer,
            gate,
            selector: Mutex::new(selector),
            config,
            supported,
            events: tx,
            slot: Mutex::new(Slot {
                generation: 0,
                state: ControllerState::Idle,
                session_id: None,
                started_at: None,
                mode: None,
                language: None,
                last_transcript: None,
                last_error: None,
                active: None,
                activations: 0,
            }),
        });

        (Self { inner }, rx)
    }

    /// Whether the host has the capture capability. When false, `activate`
    /// is a permanent no-op for this controller.
    pub fn is_supported(&self) -> bool {
        self.inner.supported
    }

    pub fn state(&self) -> ControllerState {
        self.inner.slot.lock().unwrap().state
    }

    pub fn last_transcript(&self) -> Option<String> {
        self.inner.slot.lock().unwrap().last_transcript.clone()
    }

    pub fn last_error(&self) -> Option<ErrorKind> {
        self.inner.slot.lock().unwrap().last_error
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let slot = self.inner.slot.lock().unwrap();
        SessionSnapshot {
            state: slot.state,
            is_supported: self.inner.supported,
            session_id: slot.session_id,
            started_at: slot.started_at,
            mode: slot.mode,
            language: slot.language,
            last_transcript: slot.last_transcript.clone(),
            last_error: slot.last_error,
            activations: slot.activations,
        }
    }

    /// Start a new session: resolve the locale, open a capture sub-session,
    /// and move to Listening.
    ///
    /// A no-op when the host lacks the capture capability. When a session is
    /// already Listening or Speaking, it is cancelled first, exactly as if
    /// `deactivate()` had been called.
    pub fn activate(&self, mode: InteractionMode, language: Language) {
        if !self.inner.supported {
            warn!("activate ignored, speech capture unavailable");
            return;
        }

        let inner = Arc::clone(&self.inner);
        let locale = inner.config.resolver.resolve_language(language);

        let (generation, session_id) = {
            let mut slot = inner.slot.lock().unwrap();
            if slot.state.is_active() {
                debug!("activation while busy, cancelling previous session");
                Inner::cancel_active(&mut slot);
            }

            slot.generation += 1;
            slot.activations += 1;
            let session_id = Uuid::new_v4();
            slot.session_id = Some(session_id);
            slot.started_at = Some(Utc::now());
            slot.mode = Some(mode);
            slot.language = Some(language);
            slot.last_transcript = None;
            slot.last_error = None;
            slot.state = ControllerState::Listening;
            inner.emit(&slot, VoiceEvent::StateChanged(ControllerState::Listening));
            (slot.generation, session_id)
        };

        let capture = match CaptureSession::start(
            Arc::clone(&inner.recognizer),
            locale.clone(),
            Arc::clone(inner.gate.capture()),
            inner.config.listen_timeout,
        ) {
            Ok(capture) => capture,
            Err(error) => {
                warn!(%error, "failed to open capture session");
                inner.close_with_error(generation, ErrorKind::from(&error));
                return;
            }
        };

        if !inner.register_active(generation, capture.abort_handle()) {
            // Superseded before the sub-session could be registered
            let mut capture = capture;
            capture.cancel();
            return;
        }

        info!(
            session = %session_id,
            language = %language,
            locale = %locale,
            ?mode,
            "listening"
        );

        tokio::spawn(Inner::drive(inner, generation, mode, language, locale, capture));
    }

    /// Cancel whichever sub-session is active and close the session.
    ///
    /// Synchronous: once this returns the controller is Closed and no
    /// further events for the cancelled session will be delivered. Idempotent
    /// from Idle/Closed.
    pub fn deactivate(&self) {
        let mut slot = self.inner.slot.lock().unwrap();
        if !slot.state.is_active() {
            debug!("deactivate with no active session");
            return;
        }

        slot.generation += 1;
        Inner::cancel_active(&mut slot);
        slot.state = ControllerState::Closed;
        self.inner
            .emit(&slot, VoiceEvent::StateChanged(ControllerState::Closed));
        info!(session = ?slot.session_id, "session deactivated");
    }
}

impl Inner {
    /// React to sub-session terminal events for one activation. Every
    /// consumer-visible effect goes through a generation-checked helper, so
    /// a superseded driver silently drains and exits.
    async fn drive(
        inner: Arc<Inner>,
        generation: u64,
        mode: InteractionMode,
        language: Language,
        locale: LocaleTag,
        mut capture: CaptureSession,
    ) {
        let transcript = match capture.next_event().await {
            // Cancelled from this controller (generation already bumped) or
            // preempted through the gate by another one
            None => {
                inner.close_after_cancel(generation);
                return;
            }
            Some(CaptureEvent::Error(error)) => {
                warn!(%error, "speech capture failed");
                inner.close_with_error(generation, ErrorKind::from(&error));
                return;
            }
            Some(CaptureEvent::Transcript(transcript)) => transcript,
        };

        match mode {
            InteractionMode::Capture => {
                inner.finish_with_transcript(generation, transcript.into_string());
            }
            InteractionMode::Conversational => {
                if !inner.begin_speaking(generation, transcript.into_string()) {
                    return;
                }
                // Draw from the seeded reply stream only once this session
                // is committed to speaking; a superseded driver must not
                // perturb the stream for later sessions
                let pair = inner.selector.lock().unwrap().select(language);

                let playback = match PlaybackSession::start(
                    Arc::clone(&inner.synthesizer),
                    pair.localized.clone(),
                    locale,
                    inner.config.speak_params,
                    Arc::clone(inner.gate.playback()),
                ) {
                    Ok(playback) => playback,
                    Err(error) => {
                        warn!(%error, "failed to open playback session");
                        inner.close_with_error(generation, ErrorKind::PlaybackFailed);
                        return;
                    }
                };

                if !inner.register_active(generation, playback.abort_handle()) {
                    let mut playback = playback;
                    playback.cancel();
                    return;
                }

                let mut playback = playback;
                match playback.next_event().await {
                    None => inner.close_after_cancel(generation),
                    Some(PlaybackEvent::Error(error)) => {
                        warn!(%error, "reply playback failed");
                        inner.close_with_error(generation, ErrorKind::PlaybackFailed);
                    }
                    Some(PlaybackEvent::Completed) => {
                        inner.finish_with_response(generation, pair.localized);
                    }
                }
            }
        }
    }

    fn cancel_active(slot: &mut Slot) {
        if let Some(abort) = slot.active.take() {
            abort.abort();
        }
    }

    /// Record the active sub-session so `deactivate()` can reach it. False
    /// when this activation has been superseded.
    fn register_active(&self, generation: u64, abort: AbortHandle) -> bool {
        let mut slot = self.slot.lock().unwrap();
        if slot.generation != generation {
            return false;
        }
        slot.active = Some(abort);
        true
    }

    fn begin_speaking(&self, generation: u64, transcript: String) -> bool {
        let mut slot = self.slot.lock().unwrap();
        if slot.generation != generation {
            return false;
        }
        slot.last_transcript = Some(transcript);
        slot.state = ControllerState::Speaking;
        self.emit(&slot, VoiceEvent::StateChanged(ControllerState::Speaking));
        true
    }

    fn finish_with_transcript(&self, generation: u64, transcript: String) {
        let mut slot = self.slot.lock().unwrap();
        if slot.generation != generation {
            return;
        }
        info!(session = ?slot.session_id, transcript = %transcript, "capture session complete");
        slot.last_transcript = Some(transcript.clone());
        slot.active = None;
        slot.state = ControllerState::Closed;
        self.emit(&slot, VoiceEvent::Transcript(transcript));
        self.emit(&slot, VoiceEvent::StateChanged(ControllerState::Closed));
    }

    fn finish_with_response(&self, generation: u64, response: String) {
        let mut slot = self.slot.lock().unwrap();
        if slot.generation != generation {
            return;
        }
        info!(session = ?slot.session_id, response = %response, "conversational session complete");
        slot.active = None;
        slot.state = ControllerState::Closed;
        self.emit(&slot, VoiceEvent::Response(response));
        self.emit(&slot, VoiceEvent::StateChanged(ControllerState::Closed));
    }

    /// Settle the session after its sub-session was cancelled out from
    /// under the driver. Same-controller cancellation (`deactivate()`,
    /// reentrant `activate()`) bumps the generation before aborting, so this
    /// only acts when the cancel came from elsewhere: gate preemption by
    /// another controller. Interruption is a state change, not an error.
    fn close_after_cancel(&self, generation: u64) {
        let mut slot = self.slot.lock().unwrap();
        if slot.generation != generation {
            return;
        }
        debug!(session = ?slot.session_id, "sub-session preempted, closing");
        slot.active = None;
        slot.state = ControllerState::Closed;
        self.emit(&slot, VoiceEvent::StateChanged(ControllerState::Closed));
    }

    fn close_with_error(&self, generation: u64, kind: ErrorKind) {
        let mut slot = self.slot.lock().unwrap();
        if slot.generation != generation {
            return;
        }
        slot.last_error = Some(kind);
        slot.active = None;
        slot.state = ControllerState::Closed;
        self.emit(&slot, VoiceEvent::StateChanged(ControllerState::Closed));
    }

    /// Emissions happen under the slot lock so they can never interleave
    /// with a concurrent `deactivate()`.
    fn emit(&self, _slot: &MutexGuard<'_, Slot>, event: VoiceEvent) {
        // The consumer may have dropped its receiver; state-only use is fine
        let _ = self.events.send(event);
    }
}

impl From<&CaptureError> for ErrorKind {
    fn from(error: &CaptureError) -> Self {
        match error {
            CaptureError::Unsupported => ErrorKind::Unsupported,
            _ => ErrorKind::RecognitionFailed,
        }
    }
}
