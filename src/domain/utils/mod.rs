pub mod matcher;

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

const TIMESTAMP_RE: &str = r"^(?:\d{1,2}:)?\d{1,2}:\d{2}\b";
const MATCHUP_MARKER_RE: &str = r"(?i)\b(?:vs|versus|against)\b";
const MATCHUP_PREFIX_RE: &str = r"(?i)^(?:game\s*\d+\s*:\s*)?vs\.?\s+";
const MATCHUP_SUFFIX_RE: &str = r"(?i)\s+(?:deck|game|match|matchup)$";
const EX_SUFFIX_RE: &str = r"\s+ex$";
// Possessive trainer prefixes change a deck's flavour name, not its archetype.
const TRAINER_PREFIX_RE: &str = r"^(?:ethan's|misty's|rocket's|iono's|lillie's)\s+";
const WHITESPACE_RE: &str = r"\s+";
const DECKLIST_HINT_RE: &str = r"(?i)deck\s?list";
const URL_RE: &str = r"https?://\S+";

pub static REGEX_COLLECTION: LazyLock<RegexCollection> = LazyLock::new(|| {
    let timestamp = Regex::new(TIMESTAMP_RE).expect("Invalid regex");
    let matchup_marker = Regex::new(MATCHUP_MARKER_RE).expect("Invalid regex");
    let matchup_prefix = Regex::new(MATCHUP_PREFIX_RE).expect("Invalid regex");
    let matchup_suffix = Regex::new(MATCHUP_SUFFIX_RE).expect("Invalid regex");
    let ex_suffix = Regex::new(EX_SUFFIX_RE).expect("Invalid regex");
    let trainer_prefix = Regex::new(TRAINER_PREFIX_RE).expect("Invalid regex");
    let whitespace = Regex::new(WHITESPACE_RE).expect("Invalid regex");
    let decklist_hint = Regex::new(DECKLIST_HINT_RE).expect("Invalid regex");
    let url = Regex::new(URL_RE).expect("Invalid regex");
    RegexCollection {
        timestamp,
        matchup_marker,
        matchup_prefix,
        matchup_suffix,
        ex_suffix,
        trainer_prefix,
        whitespace,
        decklist_hint,
        url,
    }
});

pub struct RegexCollection {
    pub timestamp: Regex,
    pub matchup_marker: Regex,
    pub matchup_prefix: Regex,
    pub matchup_suffix: Regex,
    pub ex_suffix: Regex,
    pub trainer_prefix: Regex,
    pub whitespace: Regex,
    pub decklist_hint: Regex,
    pub url: Regex,
}

/// Canonical comparison key for a deck or opponent name. Strips the "ex"
/// card suffix and possessive trainer prefixes, neither of which changes
/// which archetype the name refers to.
#[must_use]
pub fn normalise(name: &str) -> String {
    let lowered = name
        .nfkc()
        .collect::<String>()
        .replace('\u{2019}', "'")
        .to_lowercase();
    let stripped = REGEX_COLLECTION.ex_suffix.replace(lowered.trim(), "");
    let stripped = REGEX_COLLECTION.trainer_prefix.replace(&stripped, "");
    REGEX_COLLECTION
        .whitespace
        .replace_all(stripped.trim(), " ")
        .into_owned()
}
