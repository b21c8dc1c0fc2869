// Tests for the capture sub-session: exactly-one terminal event, cancel
// suppression, the listening timeout, and capture-lane exclusivity.

use bazaar_voice::{
    CaptureError, CaptureEvent, CaptureSession, CaptureState, LocaleTag, ScriptedRecognizer,
    SpeechGate,
};
use std::sync::Arc;
use std::time::Duration;

fn locale() -> LocaleTag {
    LocaleTag::new("en-IN")
}

#[tokio::test]
async fn successful_recognition_delivers_one_transcript() {
    let gate = SpeechGate::new();
    let recognizer = Arc::new(ScriptedRecognizer::new());
    recognizer.queue_utterance("blue saree 500");

    let mut session = CaptureSession::start(
        recognizer,
        locale(),
        Arc::clone(gate.capture()),
        Some(Duration::from_secs(2)),
    )
    .unwrap();
    assert_eq!(session.state(), CaptureState::Listening);

    match session.next_event().await {
        Some(CaptureEvent::Transcript(t)) => assert_eq!(t.as_str(), "blue saree 500"),
        other => panic!("expected transcript, got {other:?}"),
    }
    assert_eq!(session.state(), CaptureState::Closed);

    // The terminal event fires at most once
    assert!(session.next_event().await.is_none());
}

#[tokio::test]
async fn recognizer_failure_delivers_one_error() {
    let gate = SpeechGate::new();
    let recognizer = Arc::new(ScriptedRecognizer::new());
    recognizer.queue_failure(CaptureError::PermissionDenied);

    let mut session =
        CaptureSession::start(recognizer, locale(), Arc::clone(gate.capture()), None).unwrap();

    assert_eq!(
        session.next_event().await,
        Some(CaptureEvent::Error(CaptureError::PermissionDenied))
    );
    assert_eq!(session.state(), CaptureState::Closed);
    assert!(session.next_event().await.is_none());
}

#[tokio::test]
async fn blank_recognizer_output_is_no_match() {
    let gate = SpeechGate::new();
    let recognizer = Arc::new(ScriptedRecognizer::new());
    recognizer.queue_utterance("   ");

    let mut session =
        CaptureSession::start(recognizer, locale(), Arc::clone(gate.capture()), None).unwrap();

    assert_eq!(
        session.next_event().await,
        Some(CaptureEvent::Error(CaptureError::NoMatch))
    );
}

#[tokio::test]
async fn cancel_suppresses_the_terminal_event() {
    let gate = SpeechGate::new();
    let recognizer =
        Arc::new(ScriptedRecognizer::new().with_latency(Duration::from_millis(200)));
    recognizer.queue_utterance("never delivered");

    let mut session =
        CaptureSession::start(recognizer, locale(), Arc::clone(gate.capture()), None).unwrap();

    session.cancel();
    assert_eq!(session.state(), CaptureState::Closed);
    assert!(session.next_event().await.is_none());

    // Idempotent after Closed
    session.cancel();
    assert_eq!(session.state(), CaptureState::Closed);
}

#[tokio::test]
async fn missing_capability_fails_start() {
    let gate = SpeechGate::new();
    let recognizer = Arc::new(ScriptedRecognizer::unavailable());

    let result = CaptureSession::start(recognizer, locale(), Arc::clone(gate.capture()), None);
    assert!(matches!(result, Err(CaptureError::Unsupported)));
}

#[tokio::test]
async fn silent_microphone_times_out() {
    let gate = SpeechGate::new();
    // Empty script: recognize never resolves
    let recognizer = Arc::new(ScriptedRecognizer::new());

    let window = Duration::from_millis(50);
    let mut session =
        CaptureSession::start(recognizer, locale(), Arc::clone(gate.capture()), Some(window))
            .unwrap();

    assert_eq!(
        session.next_event().await,
        Some(CaptureEvent::Error(CaptureError::TimedOut(window)))
    );
    assert_eq!(session.state(), CaptureState::Closed);
}

#[tokio::test]
async fn second_listener_preempts_the_first() {
    let gate = SpeechGate::new();
    let recognizer =
        Arc::new(ScriptedRecognizer::new().with_latency(Duration::from_millis(100)));
    recognizer.queue_utterance("first");
    recognizer.queue_utterance("second");

    let mut first = CaptureSession::start(
        recognizer.clone(),
        locale(),
        Arc::clone(gate.capture()),
        None,
    )
    .unwrap();
    let mut second =
        CaptureSession::start(recognizer, locale(), Arc::clone(gate.capture()), None).unwrap();

    // Only one listen may be active process-wide: the first session was
    // aborted by the second taking the lane.
    assert!(first.next_event().await.is_none());
    assert_eq!(first.state(), CaptureState::Closed);

    match second.next_event().await {
        Some(CaptureEvent::Transcript(t)) => assert_eq!(t.as_str(), "first"),
        other => panic!("expected transcript, got {other:?}"),
    }
}
