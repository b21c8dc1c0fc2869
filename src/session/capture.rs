use crate::locale::LocaleTag;
use crate::speech::{CaptureError, Lane, SpeechRecognizer, Transcript};
use futures::future::{AbortHandle, Abortable};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::debug;

/// Capture sub-session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CaptureState {
    Idle,
    Listening,
    Closed,
}

/// Terminal event of one capture attempt. Exactly one per session, unless
/// the session is cancelled first.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    Transcript(Transcript),
    Error(CaptureError),
}

/// Sets the shared state to Closed on every exit path of the capture task,
/// including abort-by-preemption.
struct CloseOnDrop(Arc<Mutex<CaptureState>>);

impl Drop for CloseOnDrop {
    fn drop(&mut self) {
        *self.0.lock().unwrap() = CaptureState::Closed;
    }
}

/// One listen attempt against the recognizer port.
///
/// `start` acquires the process-wide capture lane (preempting any other
/// listener), runs the recognizer with the configured listening window, and
/// delivers exactly one [`CaptureEvent`]. Cancelling aborts the attempt and
/// suppresses the event.
pub struct CaptureSession {
    state: Arc<Mutex<CaptureState>>,
    abort: AbortHandle,
    events: Option<oneshot::Receiver<CaptureEvent>>,
}

impl CaptureSession {
    /// Begin listening. Fails with [`CaptureError::Unsupported`] when the
    /// recognizer capability is absent; otherwise the session is Listening
    /// when this returns.
    pub fn start(
        recognizer: Arc<dyn SpeechRecognizer>,
        locale: LocaleTag,
        lane: Arc<Lane>,
        listen_timeout: Option<Duration>,
    ) -> Result<Self, CaptureError> {
        if !recognizer.is_available() {
            return Err(CaptureError::Unsupported);
        }

        let state = Arc::new(Mutex::new(CaptureState::Listening));
        let (tx, rx) = oneshot::channel();
        let (abort, registration) = AbortHandle::new_pair();

        let task = {
            let state = Arc::clone(&state);
            let abort = abort.clone();
            async move {
                let _lease = lane.acquire(abort);
                let _closer = CloseOnDrop(state);

                let outcome = match listen_timeout {
                    Some(window) => {
                        match tokio::time::timeout(window, recognizer.recognize(&locale)).await {
                            Ok(result) => result,
                            Err(_) => Err(CaptureError::TimedOut(window)),
                        }
                    }
                    None => recognizer.recognize(&locale).await,
                };

                let event = match outcome {
                    // The transcript invariant lives here: blank recognizer
                    // output is an error, never a forwarded result.
                    Ok(text) => match Transcript::new(text) {
                        Some(transcript) => CaptureEvent::Transcript(transcript),
                        None => CaptureEvent::Error(CaptureError::NoMatch),
                    },
                    Err(error) => CaptureEvent::Error(error),
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

    pub fn state(&self) -> CaptureState {
        *self.state.lock().unwrap()
    }

    /// Await the terminal event. Resolves `None` when the session was
    /// cancelled (or on any call after the first).
    pub async fn next_event(&mut self) -> Option<CaptureEvent> {
        match self.events.take() {
            Some(rx) => rx.await.ok(),
            None => None,
        }
    }

    /// Abort the attempt without delivering a terminal event. Idempotent;
    /// a no-op once the session is Closed.
    pub fn cancel(&mut self) {
        if *self.state.lock().unwrap() == CaptureState::Closed && self.events.is_none() {
            return;
        }
        debug!("cancelling capture session");
        self.abort.abort();
        self.events = None;
        *self.state.lock().unwrap() = CaptureState::Closed;
    }

    /// Handle that aborts this session's task, for registration with the
    /// controller so `deactivate()` can reach an in-flight attempt
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.abort.abort();
    }
}
