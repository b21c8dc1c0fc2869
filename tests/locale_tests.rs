// Tests for language id parsing and locale resolution.
//
// Resolution must be total: every id maps to a tag, known or not.

use bazaar_voice::{Language, LocaleResolver, LocaleTag};

#[test]
fn known_ids_resolve_to_fixed_tags() {
    let resolver = LocaleResolver::new();

    assert_eq!(resolver.resolve("tamil").as_str(), "ta-IN");
    assert_eq!(resolver.resolve("hindi").as_str(), "hi-IN");
    assert_eq!(resolver.resolve("english").as_str(), "en-IN");
}

#[test]
fn unknown_ids_resolve_to_the_default_tag() {
    let resolver = LocaleResolver::new();

    assert_eq!(resolver.resolve("klingon").as_str(), "en-IN");
    assert_eq!(resolver.resolve("").as_str(), "en-IN");
    assert_eq!(resolver.resolve("  HINDI  ").as_str(), "hi-IN");
}

#[test]
fn english_region_is_configurable() {
    let resolver = LocaleResolver::with_default(LocaleTag::new("en-US"));

    assert_eq!(resolver.resolve("english").as_str(), "en-US");
    assert_eq!(resolver.resolve("unknown").as_str(), "en-US");
    // Non-English mappings are unaffected by the default
    assert_eq!(resolver.resolve("tamil").as_str(), "ta-IN");
}

#[test]
fn language_parsing_is_total() {
    assert_eq!(Language::from_id("tamil"), Language::Tamil);
    assert_eq!(Language::from_id("Hindi"), Language::Hindi);
    assert_eq!(Language::from_id("english"), Language::English);
    assert_eq!(Language::from_id("no-such-language"), Language::English);
}

#[test]
fn resolve_language_matches_resolve_by_id() {
    let resolver = LocaleResolver::new();

    for language in [Language::English, Language::Tamil, Language::Hindi] {
        assert_eq!(
            resolver.resolve_language(language),
            resolver.resolve(language.id())
        );
    }
}
