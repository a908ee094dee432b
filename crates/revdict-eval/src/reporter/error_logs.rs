//! Per-case error logs
//!
//! Two files are written into the output directory:
//!
//! - `top1_errors.out`: every case whose first candidate was not an expected
//!   answer, including cases with no candidates at all
//! - `top<N>_errors` (N = largest threshold): every `WRONG` case
//!
//! One line per case: `"<query>" (expected <answers>, got <top candidate>)`.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::runner::{CaseResult, EvaluationReport};

pub const TOP1_ERRORS_FILE: &str = "top1_errors.out";

/// Where the error logs were written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLogPaths {
    pub top1: PathBuf,
    pub top_max: PathBuf,
}

pub fn format_error_line(case: &CaseResult) -> String {
    format!(
        "\"{}\" (expected {}, got {})",
        case.query,
        case.expected,
        case.top_candidate()
    )
}

fn render<'a>(cases: impl Iterator<Item = &'a CaseResult>) -> String {
    let mut out = String::new();
    for case in cases {
        out.push_str(&format_error_line(case));
        out.push('\n');
    }
    out
}

/// Write both error logs into `dir`, creating it if needed
pub fn write_error_logs(report: &EvaluationReport, dir: &Path) -> Result<ErrorLogPaths> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let paths = ErrorLogPaths {
        top1: dir.join(TOP1_ERRORS_FILE),
        top_max: dir.join(format!("top{}_errors", report.max_threshold())),
    };

    fs::write(&paths.top1, render(report.top1_errors()))
        .with_context(|| format!("Failed to write {}", paths.top1.display()))?;
    fs::write(&paths.top_max, render(report.top_max_errors()))
        .with_context(|| format!("Failed to write {}", paths.top_max.display()))?;

    info!(
        top1 = report.top1_errors().count(),
        top_max = report.top_max_errors().count(),
        dir = %dir.display(),
        "Wrote error logs"
    );
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::fixtures;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_line_format() {
        let report = fixtures::report();
        assert_eq!(
            format_error_line(&report.cases[1]),
            "\"a place to keep money safe\" (expected bank, got vault)"
        );
        assert_eq!(
            format_error_line(&report.cases[2]),
            "\"gibberish\" (expected word, got <none>)"
        );
    }

    #[test]
    fn test_write_error_logs() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let paths = write_error_logs(&fixtures::report(), &out).unwrap();

        assert_eq!(paths.top1, out.join("top1_errors.out"));
        assert_eq!(paths.top_max, out.join("top100_errors"));

        let top1 = fs::read_to_string(&paths.top1).unwrap();
        assert_eq!(
            top1,
            "\"a place to keep money safe\" (expected bank, got vault)\n\
             \"gibberish\" (expected word, got <none>)\n"
        );

        let top_max = fs::read_to_string(&paths.top_max).unwrap();
        assert_eq!(top_max, "\"gibberish\" (expected word, got <none>)\n");
    }
}
