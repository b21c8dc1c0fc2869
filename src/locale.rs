use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages the assistant is configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Tamil,
    Hindi,
}

impl Language {
    /// Parse a symbolic language id as supplied by the UI layer.
    ///
    /// Total: unknown ids fall back to English rather than failing, so a
    /// stale or misspelled selector can never break activation.
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "tamil" => Language::Tamil,
            "hindi" => Language::Hindi,
            _ => Language::English,
        }
    }

    /// Symbolic id used in config files and logs
    pub fn id(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Tamil => "tamil",
            Language::Hindi => "hindi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// BCP 47 locale tag selecting language/region behavior for capture or
/// playback (e.g. "hi-IN")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocaleTag(String);

impl LocaleTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps symbolic language ids to speech locale tags.
///
/// Total function: every id resolves to a tag, unmapped ids resolve to the
/// default tag. English region differs between embedding contexts, so the
/// default is configurable.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    default_tag: LocaleTag,
}

impl LocaleResolver {
    /// Resolver with the "en-IN" default used by the dashboard context
    pub fn new() -> Self {
        Self {
            default_tag: LocaleTag::new("en-IN"),
        }
    }

    /// Resolver with an explicit default tag (e.g. "en-US" for callers
    /// outside the Indian-English context)
    pub fn with_default(default_tag: LocaleTag) -> Self {
        Self { default_tag }
    }

    /// Resolve a symbolic language id to a locale tag. Never fails.
    pub fn resolve(&self, id: &str) -> LocaleTag {
        match Language::from_id(id) {
            Language::Tamil => LocaleTag::new("ta-IN"),
            Language::Hindi => LocaleTag::new("hi-IN"),
            Language::English => self.default_tag.clone(),
        }
    }

    /// Resolve an already-parsed language
    pub fn resolve_language(&self, language: Language) -> LocaleTag {
        self.resolve(language.id())
    }
}

impl Default for LocaleResolver {
    fn default() -> Self {
        Self::new()
    }
}
