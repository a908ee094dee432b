//! Part-of-speech codes used by lexical and auxiliary sources.
//!
//! The code table is data: add a row to [`POS_TABLE`] to support a new code.

use serde::{Deserialize, Serialize};

/// Full part-of-speech categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    AdjectiveSatellite,
    Adverb,
    Phrase,
    Conjunction,
    Adposition,
    Other,
    Unknown,
}

/// Code → category mapping, WordNet-style single-letter codes
pub const POS_TABLE: &[(&str, PartOfSpeech)] = &[
    ("n", PartOfSpeech::Noun),
    ("v", PartOfSpeech::Verb),
    ("a", PartOfSpeech::Adjective),
    ("s", PartOfSpeech::AdjectiveSatellite),
    ("r", PartOfSpeech::Adverb),
    ("t", PartOfSpeech::Phrase),
    ("c", PartOfSpeech::Conjunction),
    ("p", PartOfSpeech::Adposition),
    ("x", PartOfSpeech::Other),
    ("u", PartOfSpeech::Unknown),
];

impl PartOfSpeech {
    /// Resolve a code; anything not in [`POS_TABLE`] is `Unknown`
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        POS_TABLE
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(code))
            .map(|(_, pos)| *pos)
            .unwrap_or(PartOfSpeech::Unknown)
    }

    /// Human-readable name embedded in document text
    pub fn name(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::AdjectiveSatellite => "adjective satellite",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Phrase => "phrase",
            PartOfSpeech::Conjunction => "conjunction",
            PartOfSpeech::Adposition => "adposition",
            PartOfSpeech::Other => "other",
            PartOfSpeech::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
