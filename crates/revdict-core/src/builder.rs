//! Corpus assembly from a lexicon plus auxiliary datasets.
//!
//! # Per-word cap
//!
//! Auxiliary words are capped, lexical senses never are. A word's first
//! occurrence is always retained ([`FIRST_OCCURRENCE_ALLOWANCE`]); after that,
//! occurrences are retained while the number of retained extra definitions is
//! at most `max_defs_per_word`. At most `max_defs_per_word + 1` documents per
//! word survive, in first-seen order. The count is shared across all
//! datasets in a build.

use std::collections::HashMap;

use tracing::{debug, info, instrument};

use crate::datasets::AuxiliaryDataset;
use crate::document::{Corpus, Document};
use crate::error::{CorpusBuildError, MalformedRecord};
use crate::lexicon::LexicalSource;

/// Default number of extra definitions kept per auxiliary word
pub const DEFAULT_MAX_DEFS_PER_WORD: usize = 5;

/// Occurrences always retained before the cap applies
pub const FIRST_OCCURRENCE_ALLOWANCE: usize = 1;

/// Statistics from the last build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub lexical_documents: usize,
    pub auxiliary_documents: usize,
    /// Auxiliary entries dropped by the per-word cap
    pub capped_entries: usize,
}

/// Merges lexical senses and auxiliary datasets into one corpus
#[derive(Debug, Clone)]
pub struct CorpusBuilder {
    max_defs_per_word: usize,
}

impl Default for CorpusBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEFS_PER_WORD)
    }
}

impl CorpusBuilder {
    pub fn new(max_defs_per_word: usize) -> Self {
        Self { max_defs_per_word }
    }

    /// Maximum documents retained for one auxiliary word
    pub fn max_retained_per_word(&self) -> usize {
        self.max_defs_per_word + FIRST_OCCURRENCE_ALLOWANCE
    }

    /// Build the corpus.
    ///
    /// Lexical documents come first, then each dataset in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusBuildError::MalformedRecords`] listing every malformed
    /// record across all datasets if there is at least one.
    pub fn build<L>(
        &self,
        lexicon: &L,
        datasets: &[AuxiliaryDataset],
    ) -> Result<Corpus, CorpusBuildError>
    where
        L: LexicalSource + ?Sized,
    {
        self.build_with_summary(lexicon, datasets).map(|(corpus, _)| corpus)
    }

    /// Like [`CorpusBuilder::build`], also returning build statistics
    #[instrument(skip_all, fields(lexicon = lexicon.name(), datasets = datasets.len()))]
    pub fn build_with_summary<L>(
        &self,
        lexicon: &L,
        datasets: &[AuxiliaryDataset],
    ) -> Result<(Corpus, BuildSummary), CorpusBuildError>
    where
        L: LexicalSource + ?Sized,
    {
        let malformed: Vec<MalformedRecord> = datasets
            .iter()
            .flat_map(|d| d.malformed.iter().cloned())
            .collect();
        if !malformed.is_empty() {
            return Err(CorpusBuildError::MalformedRecords(malformed));
        }

        let mut documents: Vec<Document> = lexicon.senses().map(Document::from_sense).collect();
        let mut summary = BuildSummary {
            lexical_documents: documents.len(),
            ..Default::default()
        };

        let limit = self.max_retained_per_word();
        let mut retained: HashMap<&str, usize> = HashMap::new();

        for dataset in datasets {
            let before = documents.len();
            for entry in &dataset.entries {
                let count = retained.entry(entry.word.as_str()).or_insert(0);
                if *count >= limit {
                    debug!(word = %entry.word, dataset = %dataset.name, "Per-word cap reached");
                    summary.capped_entries += 1;
                    continue;
                }
                *count += 1;
                documents.push(Document::from_auxiliary(&dataset.name, entry));
            }
            info!(
                dataset = %dataset.name,
                documents = documents.len() - before,
                "Merged auxiliary dataset"
            );
        }

        summary.auxiliary_documents = documents.len() - summary.lexical_documents;
        info!(
            lexical = summary.lexical_documents,
            auxiliary = summary.auxiliary_documents,
            capped = summary.capped_entries,
            "Corpus built"
        );

        Ok((Corpus::from_documents(documents), summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::AuxiliaryEntry;
    use crate::document::DocumentSource;
    use crate::lexicon::{Lexicon, Sense};
    use pretty_assertions::assert_eq;

    fn lexicon() -> Lexicon {
        Lexicon::new(
            "test",
            vec![
                Sense {
                    id: "s1".to_string(),
                    definition: "small rodent".to_string(),
                    pos: "n".to_string(),
                    examples: vec![],
                    lemmas: vec!["mouse".to_string()],
                },
                Sense {
                    id: "s2".to_string(),
                    definition: "another small rodent".to_string(),
                    pos: "n".to_string(),
                    examples: vec![],
                    lemmas: vec!["mouse".to_string()],
                },
            ],
        )
    }

    fn dataset(name: &str, words: &[&str]) -> AuxiliaryDataset {
        AuxiliaryDataset {
            name: name.to_string(),
            entries: words
                .iter()
                .enumerate()
                .map(|(i, w)| AuxiliaryEntry {
                    word: w.to_string(),
                    definition: format!("definition {} of {}", i, w),
                    pos: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_lexical_first_then_datasets_in_order() {
        let corpus = CorpusBuilder::default()
            .build(&lexicon(), &[dataset("a", &["vault"]), dataset("b", &["bank"])])
            .unwrap();

        let ids: Vec<&str> = corpus.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2", "vault", "bank"]);
        assert_eq!(
            corpus.documents()[0].metadata.as_ref().unwrap().source,
            DocumentSource::Lexical
        );
    }

    #[test]
    fn test_lexical_senses_are_never_capped() {
        let corpus = CorpusBuilder::new(0).build(&lexicon(), &[]).unwrap();
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_cap_keeps_max_defs_plus_one_across_datasets() {
        let first = dataset("a", &["bank"; 4]);
        let second = dataset("b", &["bank"; 4]);
        let (corpus, summary) = CorpusBuilder::new(5)
            .build_with_summary(&Lexicon::default(), &[first, second])
            .unwrap();

        assert_eq!(corpus.len(), 6);
        assert_eq!(summary.capped_entries, 2);
        // first-seen order: all of dataset a, then the first two of b
        let texts: Vec<&str> = corpus.iter().map(|d| d.text.lines().next().unwrap()).collect();
        assert_eq!(
            texts,
            vec![
                "definition 0 of bank",
                "definition 1 of bank",
                "definition 2 of bank",
                "definition 3 of bank",
                "definition 0 of bank",
                "definition 1 of bank",
            ]
        );
    }

    #[test]
    fn test_zero_cap_still_keeps_first_occurrence() {
        let corpus = CorpusBuilder::new(0)
            .build(&Lexicon::default(), &[dataset("a", &["x", "x", "y"])])
            .unwrap();
        let ids: Vec<&str> = corpus.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn test_malformed_records_fail_the_whole_build() {
        let mut bad = dataset("bad", &["ok"]);
        bad.malformed.push(MalformedRecord {
            dataset: "bad".to_string(),
            position: 1,
            reason: "missing field `word`".to_string(),
        });
        let mut worse = dataset("worse", &[]);
        worse.malformed.push(MalformedRecord {
            dataset: "worse".to_string(),
            position: 0,
            reason: "missing field `definitions`".to_string(),
        });

        let err = CorpusBuilder::default()
            .build(&lexicon(), &[bad, worse])
            .unwrap_err();
        let CorpusBuildError::MalformedRecords(records) = err;
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].dataset, "worse");
    }

    #[test]
    fn test_build_is_deterministic() {
        let datasets = [dataset("a", &["bank", "vault", "bank"])];
        let builder = CorpusBuilder::default();

        let mut first = Vec::new();
        builder.build(&lexicon(), &datasets).unwrap().write_jsonl(&mut first).unwrap();
        let mut second = Vec::new();
        builder.build(&lexicon(), &datasets).unwrap().write_jsonl(&mut second).unwrap();

        assert_eq!(first, second);
    }
}
