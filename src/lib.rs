pub mod config;
pub mod controller;
pub mod locale;
pub mod responses;
pub mod session;
pub mod speech;

pub use config::{Config, VoiceConfig};
pub use controller::{
    ControllerConfig, ControllerState, ErrorKind, InteractionMode, VoiceController, VoiceEvent,
};
pub use locale::{Language, LocaleResolver, LocaleTag};
pub use responses::{ResponsePair, ResponseSelector};
pub use session::{
    CaptureEvent, CaptureSession, CaptureState, PlaybackEvent, PlaybackSession, PlaybackState,
    SessionSnapshot,
};
pub use speech::{
    CaptureError, MockSynthesizer, PlaybackError, ScriptedRecognizer, SpeakParams, SpeechGate,
    SpeechRecognizer, SpeechSynthesizer, Transcript,
};
