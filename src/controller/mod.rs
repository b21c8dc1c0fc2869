//! Voice interaction controller
//!
//! The only component consumers interact with directly. Coordinates the
//! capture and playback sub-sessions into one session with an explicit
//! state machine:
//!
//! ```text
//! Idle -> Listening -> Closed                    (capture mode)
//! Idle -> Listening -> Speaking -> Closed        (conversational mode)
//! ```

mod controller;
mod state;

pub use controller::{ControllerConfig, VoiceController};
pub use state::{ControllerState, ErrorKind, InteractionMode, VoiceEvent};
