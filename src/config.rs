use crate::controller::ControllerConfig;
use crate::locale::{LocaleResolver, LocaleTag};
use crate::speech::SpeakParams;
use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub voice: VoiceConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Default language id for new sessions
    pub default_language: String,

    /// Listening window in seconds before an attempt fails; 0 waits
    /// indefinitely
    pub listen_timeout_secs: u64,

    /// Speaking rate passed to the synthesizer (1.0 = backend default)
    pub speak_rate: f32,

    /// Voice pitch passed to the synthesizer (1.0 = backend default)
    pub speak_pitch: f32,

    /// Locale tag used for English sessions; dashboard contexts use
    /// "en-IN", others "en-US"
    pub english_locale: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            default_language: "english".to_string(),
            listen_timeout_secs: 8,
            speak_rate: 0.9,
            speak_pitch: 1.0,
            english_locale: "en-IN".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load from `path`, falling back to defaults when the file is missing
    /// or malformed
    pub fn load_or_default(path: &str) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path, error = %e, "no usable config file, using defaults");
                Self::default()
            }
        }
    }
}

impl VoiceConfig {
    pub fn listen_timeout(&self) -> Option<Duration> {
        match self.listen_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn speak_params(&self) -> SpeakParams {
        SpeakParams {
            rate: self.speak_rate,
            pitch: self.speak_pitch,
        }
    }

    pub fn resolver(&self) -> LocaleResolver {
        LocaleResolver::with_default(LocaleTag::new(self.english_locale.clone()))
    }

    /// Controller settings derived from this file config
    pub fn controller(&self) -> ControllerConfig {
        ControllerConfig {
            listen_timeout: self.listen_timeout(),
            speak_params: self.speak_params(),
            resolver: self.resolver(),
            response_seed: None,
        }
    }
}
