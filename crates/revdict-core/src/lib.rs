//! Revdict Core - corpus assembly, search contract and candidate extraction
//! for a reverse dictionary
//!
//! This crate provides:
//! - Lexicon and auxiliary dataset loading
//! - Corpus building with per-word duplication caps
//! - The index service contract and a Tantivy-backed implementation
//! - Query lemmatization and result post-processing
//! - Corpus configuration

pub mod builder;
pub mod config;
pub mod datasets;
pub mod document;
pub mod error;
pub mod lemmatize;
pub mod lexicon;
pub mod normalize;
pub mod pos;
pub mod postprocess;
pub mod search;

// Re-export commonly used types
pub use builder::{BuildSummary, CorpusBuilder, DEFAULT_MAX_DEFS_PER_WORD};
pub use config::{CorpusConfig, DatasetSpec};
pub use datasets::{AuxiliaryDataset, AuxiliaryEntry, DatasetFormat};
pub use document::{Corpus, Document, DocumentMetadata, DocumentSource};
pub use error::{CorpusBuildError, IndexError, LoadError, MalformedRecord};
pub use lemmatize::{LemmaToken, Lemmatizer, RuleLemmatizer};
pub use lexicon::{LexicalSource, Lexicon, Sense};
pub use normalize::normalize;
pub use pos::PartOfSpeech;
pub use postprocess::{CandidateList, ResultProcessor};
pub use search::{IndexHandle, KeywordIndex, SearchHit, SemanticIndex, DEFAULT_SEARCH_K};
