//! Sub-session management
//!
//! One controller session is built from at most two sub-sessions: a capture
//! attempt and, in conversational mode, an utterance playback. Each wraps a
//! spawned task, delivers exactly one terminal event, and holds its shared
//! speech lane only for its own lifetime.

mod capture;
mod playback;
mod stats;

pub use capture::{CaptureEvent, CaptureSession, CaptureState};
pub use playback::{PlaybackEvent, PlaybackSession, PlaybackState};
pub use stats::SessionSnapshot;
