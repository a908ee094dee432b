use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to read a lexicon or auxiliary dataset from disk
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse {path} at line {line}: {source}")]
    JsonLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// An auxiliary record that is missing a required field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    /// Name of the dataset the record came from
    pub dataset: String,
    /// Zero-based record index (JSON) or one-based line number (flat text)
    pub position: usize,
    pub reason: String,
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}: {}", self.dataset, self.position, self.reason)
    }
}

/// Corpus builds are all-or-nothing
#[derive(Error, Debug)]
pub enum CorpusBuildError {
    #[error("{} malformed auxiliary record(s): {}", .0.len(), summarize(.0))]
    MalformedRecords(Vec<MalformedRecord>),
}

fn summarize(records: &[MalformedRecord]) -> String {
    const SHOWN: usize = 5;
    let mut listed: Vec<String> = records.iter().take(SHOWN).map(|r| r.to_string()).collect();
    if records.len() > SHOWN {
        listed.push(format!("... and {} more", records.len() - SHOWN));
    }
    listed.join("; ")
}

/// Errors raised by a [`crate::search::SemanticIndex`]
#[derive(Error, Debug)]
pub enum IndexError {
    /// The query could not be resolved against the index
    #[error("Lookup failed for {query:?}: {reason}")]
    Lookup { query: String, reason: String },

    #[error("Index backend error: {0}")]
    Backend(#[from] tantivy::TantivyError),

    #[error("Failed to prepare index directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
