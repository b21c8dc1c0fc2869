use serde::{Deserialize, Serialize};

/// Controller session states, observable by the UI collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    /// No session has run yet
    Idle,
    /// A capture sub-session is waiting for an utterance
    Listening,
    /// A reply is being spoken back (conversational mode only)
    Speaking,
    /// The last session finished; the controller can be re-activated
    Closed,
}

impl ControllerState {
    /// Whether a sub-session is currently in flight
    pub fn is_active(&self) -> bool {
        matches!(self, ControllerState::Listening | ControllerState::Speaking)
    }
}

/// What to do with a recognized utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// Deliver the raw transcript to the consumer
    Capture,
    /// Select a canned reply and speak it back
    Conversational,
}

impl InteractionMode {
    /// Parse a symbolic mode id as supplied by the UI layer. The original
    /// screens call these "input" and "chat".
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "capture" | "input" => InteractionMode::Capture,
            _ => InteractionMode::Conversational,
        }
    }
}

/// Error classes a session can end with, kept for UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The host lacks a speech capability. Permanent for the controller.
    Unsupported,
    /// No speech matched, permission was denied, or listening timed out.
    /// Recoverable; the controller can be re-activated immediately.
    RecognitionFailed,
    /// The synthesizer backend failed while speaking the reply
    PlaybackFailed,
}

/// Consumer-facing notifications, delivered asynchronously relative to
/// `activate()`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "event", content = "data")]
pub enum VoiceEvent {
    /// The controller moved to a new state (for listening/speaking
    /// indicators)
    StateChanged(ControllerState),
    /// A recognized utterance, capture mode only
    Transcript(String),
    /// The spoken reply text, conversational mode only, after playback
    /// completed
    Response(String),
}
