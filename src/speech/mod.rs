//! Speech capability ports and shared-resource gating.
//!
//! The recognizer and synthesizer are explicit ports so the orchestration is
//! independent of any platform speech API; the gate models the hardware's
//! one-listen/one-utterance-at-a-time constraint.

mod gate;
mod mock;
mod recognizer;
mod synthesizer;

pub use gate::{Lane, LaneLease, SpeechGate};
pub use mock::{MockSynthesizer, ScriptedRecognizer, SpokenUtterance};
pub use recognizer::{CaptureError, SpeechRecognizer, Transcript};
pub use synthesizer::{PlaybackError, SpeakParams, SpeechSynthesizer};
