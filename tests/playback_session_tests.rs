// Tests for the playback sub-session: the Completed signal fires exactly
// once or is suppressed by cancellation, and the playback lane is exclusive
// process-wide.

use bazaar_voice::{
    LocaleTag, MockSynthesizer, PlaybackError, PlaybackEvent, PlaybackSession, PlaybackState,
    SpeakParams, SpeechGate,
};
use std::sync::Arc;
use std::time::Duration;

fn locale() -> LocaleTag {
    LocaleTag::new("hi-IN")
}

#[tokio::test]
async fn natural_completion_fires_exactly_once() {
    let gate = SpeechGate::new();
    let synthesizer = Arc::new(MockSynthesizer::new().with_latency(Duration::from_millis(10)));

    let mut session = PlaybackSession::start(
        synthesizer.clone(),
        "आज की बिक्री ₹2450 है।".to_string(),
        locale(),
        SpeakParams::default(),
        Arc::clone(gate.playback()),
    )
    .unwrap();
    assert_eq!(session.state(), PlaybackState::Speaking);

    assert_eq!(session.next_event().await, Some(PlaybackEvent::Completed));
    assert_eq!(session.state(), PlaybackState::Closed);
    assert!(session.next_event().await.is_none());

    assert_eq!(synthesizer.completed(), 1);
    let spoken = synthesizer.spoken();
    assert_eq!(spoken.len(), 1);
    assert_eq!(spoken[0].text, "आज की बिक्री ₹2450 है।");
    assert_eq!(spoken[0].locale.as_str(), "hi-IN");
}

#[tokio::test]
async fn cancel_suppresses_completion() {
    let gate = SpeechGate::new();
    let synthesizer = Arc::new(MockSynthesizer::new().with_latency(Duration::from_millis(300)));

    let mut session = PlaybackSession::start(
        synthesizer.clone(),
        "You have 3 pending orders.".to_string(),
        locale(),
        SpeakParams::default(),
        Arc::clone(gate.playback()),
    )
    .unwrap();

    session.cancel();
    assert_eq!(session.state(), PlaybackState::Closed);
    assert!(session.next_event().await.is_none());
    assert_eq!(synthesizer.completed(), 0);

    // Idempotent after Closed
    session.cancel();
}

#[tokio::test]
async fn missing_capability_fails_start() {
    let gate = SpeechGate::new();
    let synthesizer = Arc::new(MockSynthesizer::unavailable());

    let result = PlaybackSession::start(
        synthesizer,
        "anything".to_string(),
        locale(),
        SpeakParams::default(),
        Arc::clone(gate.playback()),
    );
    assert!(matches!(result, Err(PlaybackError::Unsupported)));
}

#[tokio::test]
async fn new_utterance_preempts_the_one_speaking() {
    let gate = SpeechGate::new();
    let synthesizer = Arc::new(MockSynthesizer::new().with_latency(Duration::from_millis(200)));

    let mut first = PlaybackSession::start(
        synthesizer.clone(),
        "first utterance".to_string(),
        locale(),
        SpeakParams::default(),
        Arc::clone(gate.playback()),
    )
    .unwrap();
    let mut second = PlaybackSession::start(
        synthesizer.clone(),
        "second utterance".to_string(),
        locale(),
        SpeakParams::default(),
        Arc::clone(gate.playback()),
    )
    .unwrap();

    // Only one utterance may be audible at a time: starting the second
    // cancelled the first without a Completed signal.
    assert!(first.next_event().await.is_none());
    assert_eq!(first.state(), PlaybackState::Closed);

    assert_eq!(second.next_event().await, Some(PlaybackEvent::Completed));
    assert_eq!(synthesizer.completed(), 1);
}

#[tokio::test]
async fn voice_falls_back_when_locale_has_no_voice() {
    let gate = SpeechGate::new();
    let synthesizer = Arc::new(
        MockSynthesizer::new()
            .with_voices(vec![LocaleTag::new("en-IN")])
            .with_latency(Duration::from_millis(10)),
    );

    let mut session = PlaybackSession::start(
        synthesizer.clone(),
        "இன்றைய விற்பனை ₹2450.".to_string(),
        LocaleTag::new("ta-IN"),
        SpeakParams::default(),
        Arc::clone(gate.playback()),
    )
    .unwrap();

    assert_eq!(session.next_event().await, Some(PlaybackEvent::Completed));
    let spoken = synthesizer.spoken();
    assert_eq!(spoken[0].locale.as_str(), "ta-IN");
    assert_eq!(spoken[0].voice.as_str(), "en-IN");
}
