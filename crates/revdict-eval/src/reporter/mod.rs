//! Evaluation result reporting
//!
//! This module formats evaluation reports for stdout or a file and writes
//! the per-case error logs.
//!
//! # Output Formats
//!
//! - **Console**: accuracy table and latency line, human-readable
//! - **JSON**: machine-readable report, compact or pretty-printed
//!
//! # Example
//!
//! ```no_run
//! use revdict_eval::reporter::{Reporter, OutputFormat};
//! use revdict_eval::runner::EvaluationReport;
//!
//! # fn example(report: EvaluationReport) -> anyhow::Result<()> {
//! let reporter = Reporter::new(OutputFormat::Console);
//! reporter.report(&report)?;
//!
//! // Or write to a file
//! Reporter::new(OutputFormat::Json)
//!     .write_to_file(&report, "report.json")?;
//! # Ok(())
//! # }
//! ```

mod console;
mod error_logs;
mod json;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use crate::runner::EvaluationReport;

pub use console::ConsoleReporter;
pub use error_logs::{format_error_line, write_error_logs, ErrorLogPaths, TOP1_ERRORS_FILE};
pub use json::JsonReporter;

/// Output format for evaluation reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable accuracy table
    #[default]
    Console,
    /// JSON format for machine parsing
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "json_pretty" | "json-pretty" => Ok(OutputFormat::JsonPretty),
            other => bail!("Unknown output format: {}", other),
        }
    }
}

/// Reporter for evaluation results
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    /// Create a new reporter with the specified output format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Report results to stdout
    pub fn report(&self, report: &EvaluationReport) -> Result<()> {
        let output = self.format_report(report)?;
        print!("{}", output);
        io::stdout().flush()?;
        Ok(())
    }

    /// Write results to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, report: &EvaluationReport, path: P) -> Result<()> {
        let path = path.as_ref();
        let output = self.format_report(report)?;
        fs::write(path, output)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        Ok(())
    }

    /// Format results as a string
    pub fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => JsonReporter::format(report, false),
            OutputFormat::JsonPretty => JsonReporter::format(report, true),
            OutputFormat::Console => ConsoleReporter::format(report),
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}
