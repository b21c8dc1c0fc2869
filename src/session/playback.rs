use crate::locale::LocaleTag;
use crate::speech::{Lane, PlaybackError, SpeakParams, SpeechSynthesizer};
use futures::future::{AbortHandle, Abortable};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tracing::debug;

/// Playback sub-session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaybackState {
    Idle,
    Speaking,
    Closed,
}

/// Terminal event of one utterance playback. Exactly one per session, unless
/// the session is cancelled first.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// Playback reached its natural end
    Completed,
    /// The synthesizer backend failed mid-utterance
    Error(PlaybackError),
}

struct CloseOnDrop(Arc<Mutex<PlaybackState>>);

impl Drop for CloseOnDrop {
    fn drop(&mut self) {
        *self.0.lock().unwrap() = PlaybackState::Closed;
    }
}

/// One utterance spoken through the synthesizer port.
///
/// `start` acquires the process-wide playback lane, which cancels whichever
/// session is Speaking anywhere in the process; the `Completed` signal fires
/// exactly once per session or is suppressed entirely by cancellation.
pub struct PlaybackSession {
    state: Arc<Mutex<PlaybackState>>,
    abort: AbortHandle,
    events: Option<oneshot::Receiver<PlaybackEvent>>,
}

impl PlaybackSession {
    /// Begin speaking `text`. Fails with [`PlaybackError::Unsupported`] when
    /// the synthesizer capability is absent; otherwise the session is
    /// Speaking when this returns.
    pub fn start(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        text: String,
        locale: LocaleTag,
        params: SpeakParams,
        lane: Arc<Lane>,
    ) -> Result<Self, PlaybackError> {
        if !synthesizer.is_available() {
            return Err(PlaybackError::Unsupported);
        }

        let state = Arc::new(Mutex::new(PlaybackState::Speaking));
        let (tx, rx) = oneshot::channel();
        let (abort, registration) = AbortHandle::new_pair();

        let task = {
            let state = Arc::clone(&state);
            let abort = abort.clone();
            async move {
                let _lease = lane.acquire(abort);
                let _closer = CloseOnDrop(state);

                let event = match synthesizer.speak(&text, &locale, &params).await {
                    Ok(()) => PlaybackEvent::Completed,
                    Err(error) => PlaybackEvent::Error(error),
                };
                let _ = tx.send(event);
            }
        };

        let registration = Abortable::new(task, registration);
        tokio::spawn(async move {
            let _ = registration.await;
        });

        Ok(Self {
            state,
            abort,
            events: Some(rx),
        })
    }

    pub fn state(&self) -> PlaybackState {
        *self.state.lock().unwrap()
    }

    /// Await the terminal event. Resolves `None` when the session was
    /// cancelled or preempted (or on any call after the first).
    pub async fn next_event(&mut self) -> Option<PlaybackEvent> {
        match self.events.take() {
            Some(rx) => rx.await.ok(),
            None => None,
        }
    }

    /// Stop playback immediately without a `Completed` signal. Idempotent.
    pub fn cancel(&mut self) {
        if *self.state.lock().unwrap() == PlaybackState::Closed && self.events.is_none() {
            return;
        }
        debug!("cancelling playback session");
        self.abort.abort();
        self.events = None;
        *self.state.lock().unwrap() = PlaybackState::Closed;
    }

    /// Handle that aborts this session's task, for registration with the
    /// controller so `deactivate()` can reach an in-flight utterance
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.abort.abort();
    }
}
