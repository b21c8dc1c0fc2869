use crate::locale::LocaleTag;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Failure modes of one speech-capture attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The host has no speech-capture capability. Permanent.
    #[error("speech capture is not available on this host")]
    Unsupported,

    /// The attempt finished without matching any speech
    #[error("no speech was recognized")]
    NoMatch,

    /// The user or platform denied microphone access
    #[error("microphone permission was denied")]
    PermissionDenied,

    /// No terminal result arrived within the configured listening window
    #[error("listening timed out after {0:?}")]
    TimedOut(Duration),

    /// Backend-specific failure
    #[error("capture backend failure: {0}")]
    Backend(String),
}

/// Recognized utterance text, non-empty by construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript(String);

impl Transcript {
    /// Build a transcript from recognizer output. Returns `None` for empty
    /// or whitespace-only text so a blank result can never be forwarded.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Speech-capture port.
///
/// Runtime implementations wrap a platform recognizer; tests and the demo
/// binary use [`ScriptedRecognizer`](super::ScriptedRecognizer). One call is
/// one listen attempt resolving to the final recognized text.
///
/// Implementations must stop capturing when the returned future is dropped;
/// cancellation in this crate is drop-based.
#[async_trait::async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Whether the capture capability exists on this host
    fn is_available(&self) -> bool;

    /// Listen once in the given locale and resolve with the recognized text
    async fn recognize(&self, locale: &LocaleTag) -> Result<String, CaptureError>;

    /// Backend name for logging
    fn name(&self) -> &str;
}
