//! Query lemmatization.
//!
//! The post-processor only needs `(surface, lemma)` pairs for the words of a
//! query, so the service boundary is a one-method trait. [`RuleLemmatizer`]
//! is a dependency-free English implementation: an irregular-form table
//! followed by inflectional suffix rules whose output must be a known lemma.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lexicon::LexicalSource;

/// A token of the lemmatized text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmaToken {
    pub surface: String,
    pub lemma: String,
}

/// Lemmatization service
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, text: &str) -> Vec<LemmaToken>;
}

/// Irregular inflections the suffix rules get wrong
const IRREGULAR: &[(&str, &str)] = &[
    ("am", "be"),
    ("are", "be"),
    ("is", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("has", "have"),
    ("had", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("went", "go"),
    ("gone", "go"),
    ("made", "make"),
    ("kept", "keep"),
    ("left", "leave"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("people", "person"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("better", "good"),
    ("best", "good"),
    ("worse", "bad"),
    ("worst", "bad"),
];

/// Inflectional endings and their base-form replacements, tried in order
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
    ("er", ""),
    ("est", ""),
    ("er", "e"),
    ("est", "e"),
];

/// Rule-based English lemmatizer
///
/// A word found in the known-lemma set is its own lemma. Otherwise the
/// suffix rules produce candidate base forms and the first known one wins;
/// when none is known the word is left as it is. Without a known-lemma set
/// only the irregular table applies.
#[derive(Debug, Clone, Default)]
pub struct RuleLemmatizer {
    known: HashSet<String>,
}

impl RuleLemmatizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lemmatizer accepting the given base forms (matched lower-cased)
    pub fn with_lemmas<I, S>(lemmas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let known = lemmas
            .into_iter()
            .map(|lemma| lemma.as_ref().to_lowercase())
            .collect();
        Self { known }
    }

    /// Lemmatizer whose known lemmas are every lemma of `source`
    pub fn from_source<L: LexicalSource + ?Sized>(source: &L) -> Self {
        let lemmatizer = Self::with_lemmas(source.senses().flat_map(|sense| &sense.lemmas));
        debug!(lexicon = source.name(), lemmas = lemmatizer.known.len(), "Known lemmas");
        lemmatizer
    }

    pub fn known_lemmas(&self) -> usize {
        self.known.len()
    }

    /// Lemma of one lower-cased word
    pub fn lemma_of(&self, word: &str) -> String {
        let word = word.strip_suffix("'s").unwrap_or(word);
        if let Some((_, lemma)) = IRREGULAR.iter().find(|(form, _)| *form == word) {
            return lemma.to_string();
        }
        if self.known.contains(word) {
            return word.to_string();
        }

        for (suffix, replacement) in SUFFIX_RULES {
            let Some(stem) = word.strip_suffix(suffix) else {
                continue;
            };
            if stem.is_empty() {
                continue;
            }
            let candidate = format!("{}{}", stem, replacement);
            if self.known.contains(&candidate) {
                return candidate;
            }
            if replacement.is_empty() && matches!(*suffix, "ed" | "ing") {
                let undoubled = undouble(stem);
                if self.known.contains(undoubled) {
                    return undoubled.to_string();
                }
            }
        }
        word.to_string()
    }
}

/// Undo consonant doubling ("stopp" -> "stop")
fn undouble(stem: &str) -> &str {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 2 && bytes[n - 1] == bytes[n - 2] && bytes[n - 1].is_ascii_alphabetic() {
        return &stem[..n - 1];
    }
    stem
}

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize(&self, text: &str) -> Vec<LemmaToken> {
        text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .map(|t| t.trim_matches('\''))
            .filter(|t| !t.is_empty())
            .map(|surface| {
                let lower = surface.to_lowercase();
                LemmaToken {
                    surface: surface.to_string(),
                    lemma: self.lemma_of(&lower),
                }
            })
            .collect()
    }
}
