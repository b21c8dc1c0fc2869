use crate::controller::{ControllerState, ErrorKind, InteractionMode};
use crate::locale::Language;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Point-in-time view of the controller for UI rendering.
///
/// Everything here is display-only; the transcript is the only cross-session
/// datum the controller retains, and it is overwritten on the next
/// activation.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// Current controller state
    pub state: ControllerState,

    /// Whether the host has the capture capability at all
    pub is_supported: bool,

    /// Id of the current or most recent session
    pub session_id: Option<Uuid>,

    /// When the current or most recent session was activated
    pub started_at: Option<DateTime<Utc>>,

    /// Mode of the current or most recent session
    pub mode: Option<InteractionMode>,

    /// Language of the current or most recent session
    pub language: Option<Language>,

    /// Last recognized utterance, kept for display
    pub last_transcript: Option<String>,

    /// How the most recent session failed, if it did
    pub last_error: Option<ErrorKind>,

    /// Sessions started since the controller was created
    pub activations: u64,
}
