use crate::locale::Language;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// One canned reply: the canonical English text plus its localized rendering.
///
/// Corpus entries are fixed at compile time and never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePair {
    /// Canonical (reference) text, always English
    pub canonical: String,
    /// Text in the session language, spoken back to the user
    pub localized: String,
}

impl ResponsePair {
    fn new(canonical: &str, localized: &str) -> Self {
        Self {
            canonical: canonical.to_string(),
            localized: localized.to_string(),
        }
    }
}

const CANONICAL_SALES: &str = "Today's sales are ₹2450.";
const CANONICAL_ORDERS: &str = "You have 3 pending orders.";
const CANONICAL_BEST: &str = "Your best product is the Blue Silk Saree.";

/// Fixed ordered corpus for one language, three entries each
fn corpus(language: Language) -> [ResponsePair; 3] {
    match language {
        Language::English => [
            ResponsePair::new(CANONICAL_SALES, CANONICAL_SALES),
            ResponsePair::new(CANONICAL_ORDERS, CANONICAL_ORDERS),
            ResponsePair::new(CANONICAL_BEST, CANONICAL_BEST),
        ],
        Language::Tamil => [
            ResponsePair::new(CANONICAL_SALES, "இன்றைய விற்பனை ₹2450."),
            ResponsePair::new(CANONICAL_ORDERS, "உங்களிடம் 3 நிலுவை ஆர்டர்கள் உள்ளன."),
            ResponsePair::new(CANONICAL_BEST, "உங்கள் சிறந்த தயாரிப்பு நீல பட்டு புடவை."),
        ],
        Language::Hindi => [
            ResponsePair::new(CANONICAL_SALES, "आज की बिक्री ₹2450 है।"),
            ResponsePair::new(CANONICAL_ORDERS, "आपके पास 3 लंबित ऑर्डर हैं।"),
            ResponsePair::new(CANONICAL_BEST, "आपका सबसे लोकप्रिय उत्पाद नीली रेशमी साड़ी है।"),
        ],
    }
}

/// Picks one canned reply per request, uniformly over the corpus.
///
/// The RNG is injected so a fixed seed yields a reproducible pick sequence
/// under test.
#[derive(Debug)]
pub struct ResponseSelector {
    rng: StdRng,
}

impl ResponseSelector {
    /// Selector seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Selector with a fixed seed; identical seeds produce identical pick
    /// sequences
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick one response pair for the given language
    pub fn select(&mut self, language: Language) -> ResponsePair {
        let entries = corpus(language);
        let idx = self.rng.gen_range(0..entries.len());
        entries[idx].clone()
    }

    /// The full fixed corpus for a language, in order
    pub fn corpus(language: Language) -> Vec<ResponsePair> {
        corpus(language).to_vec()
    }
}

impl Default for ResponseSelector {
    fn default() -> Self {
        Self::new()
    }
}
