//! Evaluation harness for the reverse dictionary
//!
//! This crate scores ranking quality against a labeled test set: every
//! query runs through a [`revdict_core::SemanticIndex`] and the
//! post-processor, and the resulting candidate list is checked against the
//! expected answers.
//!
//! # Features
//!
//! - **Top-N accuracy**: configurable cutoffs (default 1, 3, 10, 15, 100)
//!   with an explicit denominator
//! - **Latency**: mean, median and 95th percentile of the search call
//! - **Error logs**: top-1 misses and misses beyond the largest cutoff
//! - **Output formats**: console and JSON reports
//!
//! # Example
//!
//! ```no_run
//! use revdict_core::{KeywordIndex, ResultProcessor, RuleLemmatizer};
//! use revdict_eval::{Config, Evaluator, TestSuite, reporter::{Reporter, write_error_logs}};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::from_file("revdict.toml")?;
//! let suite = TestSuite::from_file(&config.evaluation.test_cases)?;
//! let index = KeywordIndex::open_or_create(&config.corpus.index_dir)?;
//! let lemmatizer = RuleLemmatizer::from_source(&config.corpus.load_lexicon()?);
//!
//! let report = Evaluator::new(&config.evaluation)
//!     .evaluate(&suite, &index, &ResultProcessor::new(&lemmatizer));
//!
//! Reporter::new(config.output.format).report(&report)?;
//! write_error_logs(&report, &config.evaluation.output_dir)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! Runs are configured using TOML files:
//!
//! ```toml
//! [corpus]
//! lexicon = "data/wordnet.jsonl"
//! max_defs_per_word = 5
//! index_dir = "data/index"
//!
//! [[corpus.datasets]]
//! path = "data/urban.json"
//!
//! [[corpus.datasets]]
//! path = "data/wiktionary.txt"
//! format = "tsv"
//!
//! [evaluation]
//! name = "nightly"
//! test_cases = "data/test_cases.tsv"
//! thresholds = [1, 3, 10, 15, 100]
//! search_k = 100
//! output_dir = "out"
//!
//! [output]
//! format = "console"
//! report = "out/report.json"
//! ```

pub mod config;
pub mod reporter;
pub mod runner;
pub mod scoring;
pub mod stats;
pub mod testcase;

// Re-export main types for convenience
pub use config::Config;
pub use reporter::{OutputFormat, Reporter};
pub use runner::{CaseResult, EvaluationReport, Evaluator, QueryOutcome, ThresholdAccuracy};
pub use scoring::Outcome;
pub use testcase::{TestCase, TestSuite};
