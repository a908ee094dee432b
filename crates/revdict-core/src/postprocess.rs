//! Turns raw index hits into a ranked candidate list.
//!
//! Candidates are read from each hit's `Lemmas:` line, normalized, merged in
//! hit order with first-occurrence-wins dedup, and filtered so that words
//! already present in the query are never offered as answers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::lemma_line;
use crate::lemmatize::Lemmatizer;
use crate::normalize::normalize;
use crate::search::SearchHit;

/// Ordered, deduplicated, normalized candidate lemmas
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateList(Vec<String>);

impl CandidateList {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for CandidateList {
    fn from(words: Vec<String>) -> Self {
        Self(words)
    }
}

impl<'a> IntoIterator for &'a CandidateList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Normalized lemmas listed in a document text; empty when the text has no
/// `Lemmas:` line
pub fn extract_candidates(text: &str) -> Vec<String> {
    match lemma_line(text) {
        Some(line) => line
            .split(',')
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(normalize)
            .collect(),
        None => Vec::new(),
    }
}

/// What the candidate filter compares against
struct QueryTerms {
    words: HashSet<String>,
    lemmas: HashSet<String>,
    squashed: String,
    normalized: String,
}

/// Post-processor with an injected lemmatization service
pub struct ResultProcessor<'a, L: Lemmatizer + ?Sized> {
    lemmatizer: &'a L,
}

impl<'a, L: Lemmatizer + ?Sized> ResultProcessor<'a, L> {
    pub fn new(lemmatizer: &'a L) -> Self {
        Self { lemmatizer }
    }

    /// Build the candidate list for `query` from `hits`, preserving hit order
    pub fn process(&self, query: &str, hits: &[SearchHit]) -> CandidateList {
        let terms = self.query_terms(query);
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for hit in hits {
            let words = extract_candidates(&hit.text);
            if words.is_empty() {
                debug!(id = %hit.id, "Hit has no lemmas");
                continue;
            }
            for word in words {
                if !seen.insert(word.clone()) {
                    continue;
                }
                if is_trivial(&terms, &word) {
                    debug!(candidate = %word, "Dropping candidate found in query");
                    continue;
                }
                candidates.push(word);
            }
        }

        CandidateList(candidates)
    }

    fn query_terms(&self, query: &str) -> QueryTerms {
        let tokens = self.lemmatizer.lemmatize(query);
        QueryTerms {
            words: tokens.iter().map(|t| normalize(&t.surface)).collect(),
            lemmas: tokens.iter().map(|t| normalize(&t.lemma)).collect(),
            squashed: query.replace(' ', ""),
            normalized: normalize(query),
        }
    }
}

fn is_trivial(terms: &QueryTerms, word: &str) -> bool {
    let normalized = normalize(word);
    terms.words.contains(&normalized)
        || terms.lemmas.contains(&normalized)
        || word.replace(' ', "") == terms.squashed
        || normalized == terms.normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lemmatize::RuleLemmatizer;
    use pretty_assertions::assert_eq;

    fn hit(id: &str, lemmas: &str) -> SearchHit {
        SearchHit {
            id: id.to_string(),
            text: format!("gloss for {}\nLemmas: {}", id, lemmas),
            score: 1.0,
        }
    }

    fn process(query: &str, hits: &[SearchHit]) -> Vec<String> {
        let lemmatizer = RuleLemmatizer::with_lemmas(["rodent", "even", "evening", "dusk"]);
        ResultProcessor::new(&lemmatizer).process(query, hits).into_vec()
    }

    #[test]
    fn test_query_words_are_filtered() {
        let hits = vec![hit("a", "rodent, mouse"), hit("b", "small")];
        assert_eq!(process("small rodent", &hits), vec!["mouse"]);
    }

    #[test]
    fn test_query_lemmas_are_filtered() {
        let hits = vec![hit("a", "rodent, Mouse, vole")];
        assert_eq!(process("small rodents", &hits), vec!["mouse", "vole"]);
    }

    #[test]
    fn test_known_query_word_is_not_reduced_to_a_shorter_lemma() {
        let hits = vec![hit("a", "even, dusk"), hit("b", "evening, nightfall")];
        assert_eq!(process("the early evening", &hits), vec!["even", "dusk", "nightfall"]);
    }

    #[test]
    fn test_whole_query_and_squashed_query_are_filtered() {
        let hits = vec![hit("a", "ice cream, icecream, gelato")];
        assert_eq!(process("ice cream", &hits), vec!["gelato"]);
    }

    #[test]
    fn test_merge_dedup_first_occurrence_wins() {
        let hits = vec![
            hit("a", "vault, safe deposit box"),
            hit("b", "bank, Vault"),
            hit("c", "trust, bank"),
        ];
        assert_eq!(
            process("a place to keep money safe", &hits),
            vec!["vault", "safe_deposit_box", "bank", "trust"]
        );
    }

    #[test]
    fn test_hit_without_lemmas_contributes_nothing() {
        let broken = SearchHit {
            id: "x".to_string(),
            text: "no lemma line here".to_string(),
            score: 0.5,
        };
        let hits = vec![broken, hit("a", "mouse")];
        assert_eq!(process("small rodent", &hits), vec!["mouse"]);
    }

    #[test]
    fn test_extract_candidates_normalizes_and_drops_blanks() {
        assert_eq!(
            extract_candidates("x\nLemmas: Crème brûlée, , field mouse,"),
            vec!["creme_brulee", "field_mouse"]
        );
        assert!(extract_candidates("").is_empty());
    }

    #[test]
    fn test_no_hits_yields_empty_list() {
        assert!(process("anything", &[]).is_empty());
    }
}
