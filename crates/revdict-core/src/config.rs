//! Corpus configuration
//!
//! Describes where corpus inputs live and how the corpus is assembled. The
//! struct deserializes from the `[corpus]` table of the workspace's TOML
//! config; paths are taken as written (relative to the working directory).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::builder::{CorpusBuilder, DEFAULT_MAX_DEFS_PER_WORD};
use crate::datasets::{self, AuxiliaryDataset, DatasetFormat};
use crate::error::LoadError;
use crate::lexicon::Lexicon;

/// One auxiliary dataset input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSpec {
    pub path: PathBuf,
    /// Inferred from the file extension when omitted
    #[serde(default)]
    pub format: Option<DatasetFormat>,
}

impl DatasetSpec {
    pub fn format(&self) -> DatasetFormat {
        self.format
            .unwrap_or_else(|| DatasetFormat::from_path(&self.path))
    }
}

/// Corpus inputs and build settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Lexicon export (JSON array or JSON lines)
    pub lexicon: PathBuf,

    #[serde(default)]
    pub datasets: Vec<DatasetSpec>,

    #[serde(default = "default_max_defs_per_word")]
    pub max_defs_per_word: usize,

    /// Directory holding the on-disk search index
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,

    /// Where to persist the built corpus as JSON lines
    #[serde(default)]
    pub corpus_out: Option<PathBuf>,
}

fn default_max_defs_per_word() -> usize {
    DEFAULT_MAX_DEFS_PER_WORD
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("./revdict-index")
}

impl CorpusConfig {
    /// Config with defaults for everything but the lexicon path
    pub fn new(lexicon: impl AsRef<Path>) -> Self {
        Self {
            lexicon: lexicon.as_ref().to_path_buf(),
            datasets: Vec::new(),
            max_defs_per_word: default_max_defs_per_word(),
            index_dir: default_index_dir(),
            corpus_out: None,
        }
    }

    pub fn builder(&self) -> CorpusBuilder {
        CorpusBuilder::new(self.max_defs_per_word)
    }

    pub fn load_lexicon(&self) -> Result<Lexicon, LoadError> {
        Lexicon::from_path(&self.lexicon)
    }

    /// Load every configured dataset, keeping configuration order
    pub fn load_datasets(&self) -> Result<Vec<AuxiliaryDataset>, LoadError> {
        let specs: Vec<(PathBuf, DatasetFormat)> = self
            .datasets
            .iter()
            .map(|d| (d.path.clone(), d.format()))
            .collect();
        datasets::load_all(&specs)
    }
}
