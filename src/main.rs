use anyhow::Result;
use bazaar_voice::{
    Config, InteractionMode, Language, MockSynthesizer, ScriptedRecognizer, VoiceController,
    VoiceEvent,
};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

/// Demo driver for the voice interaction controller, wired to scripted
/// speech backends
#[derive(Parser, Debug)]
#[command(name = "bazaar-voice", version)]
struct Args {
    /// Language id for the session (english, tamil, hindi); defaults to the
    /// configured language
    #[arg(long)]
    language: Option<String>,

    /// Session mode: capture (raw transcript) or conversational (spoken
    /// reply)
    #[arg(long, default_value = "conversational")]
    mode: String,

    /// What the scripted recognizer should "hear"
    #[arg(long, default_value = "how are my sales today")]
    utterance: String,

    /// Config file path, without extension
    #[arg(long, default_value = "config/bazaar-voice")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load_or_default(&args.config);

    let language = Language::from_id(
        args.language
            .as_deref()
            .unwrap_or(&cfg.voice.default_language),
    );
    let mode = InteractionMode::from_id(&args.mode);

    let recognizer = Arc::new(ScriptedRecognizer::new());
    recognizer.queue_utterance(&args.utterance);
    let synthesizer = Arc::new(MockSynthesizer::new());

    let (controller, mut events) =
        VoiceController::new(recognizer, synthesizer, cfg.voice.controller());

    info!("Bazaar Voice v0.1.0");
    controller.activate(mode, language);

    while let Some(event) = events.recv().await {
        match &event {
            VoiceEvent::Transcript(text) => info!(%text, "transcript delivered"),
            VoiceEvent::Response(text) => info!(%text, "response spoken"),
            VoiceEvent::StateChanged(state) => {
                info!(?state, "state changed");
                if !state.is_active() {
                    break;
                }
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);

    Ok(())
}
