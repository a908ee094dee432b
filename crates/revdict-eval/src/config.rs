//! Configuration parsing for evaluation runs
//!
//! One TOML file describes the corpus inputs, the labeled test set and how
//! results are reported.

use anyhow::{bail, Context};
use revdict_core::{CorpusConfig, DEFAULT_SEARCH_K};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::reporter::OutputFormat;

/// Top-N cutoffs reported when none are configured
pub const DEFAULT_THRESHOLDS: [usize; 5] = [1, 3, 10, 15, 100];

/// Main configuration structure loaded from TOML files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Corpus inputs and build settings
    pub corpus: CorpusConfig,
    /// Test set and scoring settings
    pub evaluation: EvaluationConfig,
    /// Report output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML is malformed
    /// - Required fields are missing
    /// - The threshold list is empty or contains zero
    ///
    /// # Example
    ///
    /// ```no_run
    /// use revdict_eval::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = Config::from_file("revdict.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Example
    ///
    /// ```
    /// use revdict_eval::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let toml = r#"
    ///     [corpus]
    ///     lexicon = "data/wordnet.jsonl"
    ///
    ///     [evaluation]
    ///     test_cases = "data/test.tsv"
    /// "#;
    /// let config = Config::from_str(toml)?;
    /// assert_eq!(config.evaluation.thresholds, vec![1, 3, 10, 15, 100]);
    /// # Ok(())
    /// # }
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        let mut config: Config = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config.evaluation.validate()?;
        Ok(config)
    }
}

/// Test set and scoring parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Name of the evaluation suite (default: "reverse-dictionary")
    #[serde(default = "default_name")]
    pub name: String,
    /// Tab-separated test-case file
    pub test_cases: PathBuf,
    /// Top-N cutoffs (default: 1, 3, 10, 15, 100)
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<usize>,
    /// Neighbors requested per query; raised to the largest threshold if lower
    #[serde(default = "default_search_k")]
    pub search_k: usize,
    /// Directory receiving the error logs (default: ".")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_name() -> String {
    "reverse-dictionary".to_string()
}

fn default_thresholds() -> Vec<usize> {
    DEFAULT_THRESHOLDS.to_vec()
}

fn default_search_k() -> usize {
    DEFAULT_SEARCH_K
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl EvaluationConfig {
    /// Config with defaults for everything but the test-case path
    pub fn new(test_cases: impl AsRef<Path>) -> Self {
        Self {
            name: default_name(),
            test_cases: test_cases.as_ref().to_path_buf(),
            thresholds: default_thresholds(),
            search_k: default_search_k(),
            output_dir: default_output_dir(),
        }
    }

    /// Sort and dedup thresholds, rejecting empty lists and zero
    pub fn validate(&mut self) -> anyhow::Result<()> {
        if self.thresholds.is_empty() {
            bail!("evaluation.thresholds must list at least one cutoff");
        }
        if self.thresholds.contains(&0) {
            bail!("evaluation.thresholds must be positive, got {:?}", self.thresholds);
        }
        self.thresholds.sort_unstable();
        self.thresholds.dedup();
        Ok(())
    }

    /// Largest configured threshold
    pub fn max_threshold(&self) -> usize {
        self.thresholds.last().copied().unwrap_or(0)
    }

    /// Neighbors to request per query, never below the largest threshold
    pub fn effective_search_k(&self) -> usize {
        self.search_k.max(self.max_threshold())
    }
}

/// Report output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report format printed to stdout
    #[serde(default)]
    pub format: OutputFormat,
    /// Also write the report to this file
    #[serde(default)]
    pub report: Option<PathBuf>,
}
