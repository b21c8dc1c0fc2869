//! Scripted speech backends.
//!
//! The product demo has no real recognizer or synthesizer behind it; these
//! backends stand in for the platform capabilities so the orchestration can
//! be exercised end to end, in the demo binary and in tests.

use super::recognizer::{CaptureError, SpeechRecognizer};
use super::synthesizer::{PlaybackError, SpeakParams, SpeechSynthesizer};
use crate::locale::LocaleTag;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Recognizer that replays a queued script of outcomes.
///
/// Each `recognize` call pops the next queued outcome after a short
/// artificial latency. An empty script behaves like a silent microphone:
/// the call never resolves, which is what the listening timeout is for.
pub struct ScriptedRecognizer {
    outcomes: Mutex<VecDeque<Result<String, CaptureError>>>,
    latency: Duration,
    available: bool,
}

impl ScriptedRecognizer {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            latency: Duration::from_millis(10),
            available: true,
        }
    }

    /// Recognizer reporting the capture capability as absent
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Queue a successful recognition
    pub fn queue_utterance(&self, text: impl Into<String>) {
        self.outcomes.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue a failed attempt
    pub fn queue_failure(&self, error: CaptureError) {
        self.outcomes.lock().unwrap().push_back(Err(error));
    }
}

impl Default for ScriptedRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn recognize(&self, locale: &LocaleTag) -> Result<String, CaptureError> {
        if !self.available {
            return Err(CaptureError::Unsupported);
        }

        tokio::time::sleep(self.latency).await;

        let next = self.outcomes.lock().unwrap().pop_front();
        match next {
            Some(outcome) => {
                debug!(locale = %locale, ok = outcome.is_ok(), "scripted recognition");
                outcome
            }
            // Silent microphone: nothing to recognize, never resolves
            None => std::future::pending().await,
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// One utterance a [`MockSynthesizer`] was asked to speak
#[derive(Debug, Clone)]
pub struct SpokenUtterance {
    pub text: String,
    /// Locale requested by the session
    pub locale: LocaleTag,
    /// Voice actually used after fallback
    pub voice: LocaleTag,
    pub params: SpeakParams,
}

/// Synthesizer that simulates playback with a sleep.
///
/// Utterances are recorded when playback starts; `completed()` counts only
/// utterances whose playback ran to its natural end, so cancelled playback
/// is observable as started-but-not-completed.
pub struct MockSynthesizer {
    voices: Vec<LocaleTag>,
    base_latency: Duration,
    per_char: Duration,
    available: bool,
    spoken: Mutex<Vec<SpokenUtterance>>,
    completed: AtomicUsize,
}

impl MockSynthesizer {
    pub fn new() -> Self {
        Self {
            voices: ["en-IN", "en-US", "ta-IN", "hi-IN"]
                .into_iter()
                .map(LocaleTag::new)
                .collect(),
            base_latency: Duration::from_millis(20),
            per_char: Duration::from_micros(200),
            available: true,
            spoken: Mutex::new(Vec::new()),
            completed: AtomicUsize::new(0),
        }
    }

    /// Synthesizer reporting the playback capability as absent
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Fixed playback duration regardless of text length
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.base_latency = latency;
        self.per_char = Duration::ZERO;
        self
    }

    /// Restrict the installed voice set
    pub fn with_voices(mut self, voices: Vec<LocaleTag>) -> Self {
        self.voices = voices;
        self
    }

    /// Utterances whose playback was started, in order
    pub fn spoken(&self) -> Vec<SpokenUtterance> {
        self.spoken.lock().unwrap().clone()
    }

    /// Number of utterances whose playback ran to completion
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Voice selection with the same fallback the product uses: first voice
    /// matching the locale's language prefix, else the first English voice,
    /// else whatever is installed.
    fn pick_voice(&self, locale: &LocaleTag) -> Option<LocaleTag> {
        let prefix = locale.as_str().split('-').next().unwrap_or_default();
        self.voices
            .iter()
            .find(|v| v.as_str().starts_with(prefix))
            .or_else(|| self.voices.iter().find(|v| v.as_str().starts_with("en")))
            .or_else(|| self.voices.first())
            .cloned()
    }
}

impl Default for MockSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn speak(
        &self,
        text: &str,
        locale: &LocaleTag,
        params: &SpeakParams,
    ) -> Result<(), PlaybackError> {
        if !self.available {
            return Err(PlaybackError::Unsupported);
        }

        let voice = self
            .pick_voice(locale)
            .ok_or_else(|| PlaybackError::Backend("no voices installed".to_string()))?;
        if voice.as_str() != locale.as_str() {
            debug!(requested = %locale, voice = %voice, "falling back to installed voice");
        }

        self.spoken.lock().unwrap().push(SpokenUtterance {
            text: text.to_string(),
            locale: locale.clone(),
            voice,
            params: *params,
        });

        let duration = self.base_latency + self.per_char * text.chars().count() as u32;
        tokio::time::sleep(duration).await;

        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
