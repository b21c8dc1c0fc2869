use crate::locale::LocaleTag;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure modes of one playback attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The host has no speech-synthesis capability. Permanent.
    #[error("speech synthesis is not available on this host")]
    Unsupported,

    /// Backend-specific failure
    #[error("playback backend failure: {0}")]
    Backend(String),
}

/// Prosody parameters for one utterance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeakParams {
    /// Speaking rate, 1.0 = backend default
    pub rate: f32,
    /// Voice pitch, 1.0 = backend default
    pub pitch: f32,
}

impl Default for SpeakParams {
    fn default() -> Self {
        // Slightly slowed speech reads better for mixed-script replies
        Self {
            rate: 0.9,
            pitch: 1.0,
        }
    }
}

/// Speech-playback port.
///
/// One call speaks one utterance and resolves when playback has finished.
/// Implementations must stop the audio when the returned future is dropped;
/// cancellation in this crate is drop-based.
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Whether the playback capability exists on this host
    fn is_available(&self) -> bool;

    /// Speak `text` in the given locale, resolving on natural completion
    async fn speak(
        &self,
        text: &str,
        locale: &LocaleTag,
        params: &SpeakParams,
    ) -> Result<(), PlaybackError>;

    /// Backend name for logging
    fn name(&self) -> &str;
}
