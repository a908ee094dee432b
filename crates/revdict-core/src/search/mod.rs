//! Search module - the index service contract and the bundled implementation
//!
//! The reverse dictionary treats its nearest-neighbor index as a black box:
//! it hands over a [`Corpus`] once, then asks for the `k` best documents for
//! a description. Anything implementing [`SemanticIndex`] can back the
//! post-processor and the evaluation harness. [`KeywordIndex`] is a
//! Tantivy (BM25) implementation used for local runs and tests.

pub mod keyword;

pub use keyword::KeywordIndex;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::document::Corpus;
use crate::error::IndexError;

/// Default number of neighbors requested per query
pub const DEFAULT_SEARCH_K: usize = 100;

/// One neighbor returned by the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    /// Full stored document text
    pub text: String,
    /// Similarity as reported by the index; only its order is meaningful
    pub score: f32,
}

/// Result of indexing a corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHandle {
    pub documents: usize,
    /// On-disk location, `None` for in-memory indexes
    pub location: Option<PathBuf>,
}

/// Embedding/index service contract
pub trait SemanticIndex {
    /// Index every document of `corpus`, keeping ids and full text retrievable
    fn index(&mut self, corpus: &Corpus) -> Result<IndexHandle, IndexError>;

    /// Up to `k` most similar documents, best first
    fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, IndexError>;
}
