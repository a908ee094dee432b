//! Evaluation run orchestration
//!
//! Drives the search index and post-processor over every labeled case,
//! scores each candidate list against the expected answers and aggregates
//! top-N accuracy and latency.
//!
//! ```text
//! ┌────────┐  search(query, k)  ┌─────────┐  process  ┌────────┐  rank  ┌────────┐
//! │  START │ ─────────────────▶ │ QUERIED │ ────────▶ │ SCORED │ ─────▶ │ report │
//! └────────┘   (timed, ms)      └─────────┘           └────────┘        └────────┘
//! ```
//!
//! A failed lookup never aborts the run: it becomes
//! [`QueryOutcome::Failed`] and the case is scored as a miss.
//!
//! # Example
//!
//! ```no_run
//! use revdict_core::{KeywordIndex, ResultProcessor, RuleLemmatizer};
//! use revdict_eval::{Config, runner::Evaluator, testcase::TestSuite};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::from_file("revdict.toml")?;
//! let suite = TestSuite::from_file(&config.evaluation.test_cases)?;
//! let index = KeywordIndex::open_or_create(&config.corpus.index_dir)?;
//! let lemmatizer = RuleLemmatizer::from_source(&config.corpus.load_lexicon()?);
//!
//! let report = Evaluator::new(&config.evaluation)
//!     .evaluate(&suite, &index, &ResultProcessor::new(&lemmatizer));
//! println!("top-1: {:.3}", report.accuracy[0].rate);
//! # Ok(())
//! # }
//! ```

use revdict_core::{normalize, CandidateList, Lemmatizer, ResultProcessor, SemanticIndex};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, instrument, warn};

use crate::config::EvaluationConfig;
use crate::scoring::{classify, credited, find_rank, Outcome};
use crate::stats::LatencySummary;
use crate::testcase::{TestCase, TestSuite};

/// Shown in place of a top candidate when there is none
pub const NO_CANDIDATE: &str = "<none>";

/// What a single query produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum QueryOutcome {
    Ok(CandidateList),
    /// The index could not answer; the reason is kept for the report
    Failed(String),
}

impl QueryOutcome {
    /// Candidates to score; empty for failed lookups
    pub fn candidates(&self) -> &[String] {
        match self {
            QueryOutcome::Ok(list) => list.as_slice(),
            QueryOutcome::Failed(_) => &[],
        }
    }
}

/// Result for a single test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    pub query: String,
    /// Expected answers as written in the test file
    pub expected: String,
    pub outcome: Outcome,
    /// Position of the first expected answer within the scan window
    pub rank: Option<usize>,
    /// Leading candidates, up to the largest threshold
    pub candidates: Vec<String>,
    /// Search call latency in milliseconds
    pub latency_ms: f64,
    /// Lookup failure reason, if the index could not answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl CaseResult {
    pub fn top_candidate(&self) -> &str {
        self.candidates
            .first()
            .map(String::as_str)
            .unwrap_or(NO_CANDIDATE)
    }

    /// Cases not answered correctly at position 0
    pub fn is_top1_miss(&self) -> bool {
        self.rank != Some(0)
    }
}

/// Accuracy at one top-N cutoff
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdAccuracy {
    pub threshold: usize,
    pub correct: usize,
    /// Number of scored cases
    pub total: usize,
    pub rate: f64,
}

/// Results from a complete evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Name of the evaluation suite
    pub suite_name: String,
    /// RFC 3339 timestamp when the run started
    pub started_at: String,
    /// Total duration of the run
    pub total_duration_ms: u64,
    /// Sorted top-N cutoffs
    pub thresholds: Vec<usize>,
    /// Neighbors requested per query
    pub search_k: usize,
    /// Cases actually scored; the accuracy denominator
    pub scored: usize,
    pub accuracy: Vec<ThresholdAccuracy>,
    pub latency: LatencySummary,
    pub blank_lines: usize,
    pub format_mismatches: usize,
    pub failed_lookups: usize,
    pub cases: Vec<CaseResult>,
}

impl EvaluationReport {
    pub fn max_threshold(&self) -> usize {
        self.thresholds.last().copied().unwrap_or(0)
    }

    /// Every case whose first candidate was not an expected answer
    pub fn top1_errors(&self) -> impl Iterator<Item = &CaseResult> {
        self.cases.iter().filter(|c| c.is_top1_miss())
    }

    /// Every case with no expected answer within the largest threshold
    pub fn top_max_errors(&self) -> impl Iterator<Item = &CaseResult> {
        self.cases.iter().filter(|c| c.outcome == Outcome::Wrong)
    }

    pub fn accuracy_at(&self, threshold: usize) -> Option<&ThresholdAccuracy> {
        self.accuracy.iter().find(|a| a.threshold == threshold)
    }
}

/// The evaluation runner
#[derive(Debug, Clone)]
pub struct Evaluator {
    name: String,
    thresholds: Vec<usize>,
    search_k: usize,
}

impl Evaluator {
    /// Build from validated configuration (thresholds sorted, non-empty)
    pub fn new(config: &EvaluationConfig) -> Self {
        Self {
            name: config.name.clone(),
            thresholds: config.thresholds.clone(),
            search_k: config.effective_search_k(),
        }
    }

    pub fn search_k(&self) -> usize {
        self.search_k
    }

    fn max_threshold(&self) -> usize {
        self.thresholds.last().copied().unwrap_or(0)
    }

    /// Run every case of `suite` through `index` and `processor`
    #[instrument(skip_all, fields(suite = %self.name, cases = suite.len()))]
    pub fn evaluate<I, L>(
        &self,
        suite: &TestSuite,
        index: &I,
        processor: &ResultProcessor<'_, L>,
    ) -> EvaluationReport
    where
        I: SemanticIndex + ?Sized,
        L: Lemmatizer + ?Sized,
    {
        let started_at = chrono::Utc::now().to_rfc3339();
        let run_start = Instant::now();

        let mut correct = vec![0usize; self.thresholds.len()];
        let mut latencies = Vec::with_capacity(suite.len());
        let mut cases = Vec::with_capacity(suite.len());

        for case in &suite.cases {
            let result = self.run_case(case, index, processor);

            for n in credited(result.rank, &self.thresholds) {
                if let Some(slot) = self.thresholds.iter().position(|&t| t == n) {
                    correct[slot] += 1;
                }
            }
            latencies.push(result.latency_ms);
            cases.push(result);
        }

        let scored = cases.len();
        let accuracy = self
            .thresholds
            .iter()
            .zip(&correct)
            .map(|(&threshold, &correct)| ThresholdAccuracy {
                threshold,
                correct,
                total: scored,
                rate: if scored == 0 {
                    0.0
                } else {
                    correct as f64 / scored as f64
                },
            })
            .collect();

        let failed_lookups = cases.iter().filter(|c| c.failure.is_some()).count();
        let report = EvaluationReport {
            suite_name: self.name.clone(),
            started_at,
            total_duration_ms: run_start.elapsed().as_millis() as u64,
            thresholds: self.thresholds.clone(),
            search_k: self.search_k,
            scored,
            accuracy,
            latency: LatencySummary::from_samples(&latencies),
            blank_lines: suite.blank_lines,
            format_mismatches: suite.format_mismatches.len(),
            failed_lookups,
            cases,
        };

        info!(
            scored = report.scored,
            failed_lookups = report.failed_lookups,
            skipped = report.format_mismatches,
            duration_ms = report.total_duration_ms,
            "Evaluation complete"
        );
        report
    }

    /// Search and post-process one query, timing the search call only
    pub fn query<I, L>(
        &self,
        query: &str,
        index: &I,
        processor: &ResultProcessor<'_, L>,
    ) -> (QueryOutcome, f64)
    where
        I: SemanticIndex + ?Sized,
        L: Lemmatizer + ?Sized,
    {
        let start = Instant::now();
        let hits = index.search(query, self.search_k);
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        let outcome = match hits {
            Ok(hits) => QueryOutcome::Ok(processor.process(query, &hits)),
            Err(e) => {
                warn!(query, error = %e, "Lookup failed; scoring as a miss");
                QueryOutcome::Failed(e.to_string())
            }
        };
        (outcome, latency_ms)
    }

    fn run_case<I, L>(
        &self,
        case: &TestCase,
        index: &I,
        processor: &ResultProcessor<'_, L>,
    ) -> CaseResult
    where
        I: SemanticIndex + ?Sized,
        L: Lemmatizer + ?Sized,
    {
        let (outcome, latency_ms) = self.query(&case.query, index, processor);

        let candidates: Vec<String> = outcome
            .candidates()
            .iter()
            .take(self.max_threshold())
            .map(|c| normalize(c))
            .collect();
        let rank = find_rank(&candidates, &case.expected, self.max_threshold());
        let label = classify(rank, &self.thresholds);

        info!(
            "{}: Queried for \"{}\", got {:?}, expected {}",
            label, case.query, candidates, case.alternation
        );

        CaseResult {
            query: case.query.clone(),
            expected: case.alternation.clone(),
            outcome: label,
            rank,
            candidates,
            latency_ms,
            failure: match outcome {
                QueryOutcome::Failed(reason) => Some(reason),
                QueryOutcome::Ok(_) => None,
            },
        }
    }
}
