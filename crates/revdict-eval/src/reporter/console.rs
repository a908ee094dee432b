//! Console reporter for evaluation results
//!
//! Prints the run header, one accuracy line per threshold and the latency
//! line.

use anyhow::Result;
use std::fmt::Write;

use crate::runner::EvaluationReport;

/// Console format reporter
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Format evaluation results for console output
    pub fn format(report: &EvaluationReport) -> Result<String> {
        let mut output = String::new();

        // Header
        writeln!(output)?;
        writeln!(output, "╔══════════════════════════════════════════════════════════════╗")?;
        writeln!(output, "║                   REVERSE DICTIONARY EVAL                    ║")?;
        writeln!(output, "╚══════════════════════════════════════════════════════════════╝")?;
        writeln!(output)?;

        // Suite info
        writeln!(output, "Suite:     {}", report.suite_name)?;
        writeln!(output, "Started:   {}", report.started_at)?;
        writeln!(output, "Duration:  {}ms", report.total_duration_ms)?;
        writeln!(output, "Search k:  {}", report.search_k)?;
        writeln!(output)?;

        writeln!(output, "Cases:")?;
        writeln!(output, "  Scored:             {}", report.scored)?;
        writeln!(output, "  Failed lookups:     {}", report.failed_lookups)?;
        writeln!(output, "  Format mismatches:  {}", report.format_mismatches)?;
        writeln!(output, "  Blank lines:        {}", report.blank_lines)?;
        writeln!(output)?;

        writeln!(output, "────────────────────────────────────────────────────────────────")?;
        for accuracy in &report.accuracy {
            writeln!(
                output,
                "Accuracy @top{}:  {} / {} = {:.6}",
                accuracy.threshold, accuracy.correct, accuracy.total, accuracy.rate
            )?;
        }
        writeln!(
            output,
            "Mean/median/95%ile latency: {:.6},{:.6},{:.6} msec",
            report.latency.mean, report.latency.median, report.latency.p95
        )?;
        writeln!(output, "────────────────────────────────────────────────────────────────")?;

        writeln!(output)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::fixtures;

    #[test]
    fn test_console_format_contains_suite_name() {
        let output = ConsoleReporter::format(&fixtures::report()).unwrap();
        assert!(output.contains("Test Suite"));
    }

    #[test]
    fn test_console_format_accuracy_lines() {
        let output = ConsoleReporter::format(&fixtures::report()).unwrap();

        assert!(output.contains("Accuracy @top1:  1 / 3 = 0.333333"));
        assert!(output.contains("Accuracy @top3:  2 / 3 = 0.666667"));
        assert!(output.contains("Accuracy @top100:  2 / 3 = 0.666667"));
    }

    #[test]
    fn test_console_format_latency_line() {
        let output = ConsoleReporter::format(&fixtures::report()).unwrap();
        assert!(output.contains(
            "Mean/median/95%ile latency: 20.000000,20.000000,30.000000 msec"
        ));
    }

    #[test]
    fn test_console_format_shows_counts() {
        let output = ConsoleReporter::format(&fixtures::report()).unwrap();

        assert!(output.contains("Scored:             3"));
        assert!(output.contains("Blank lines:        1"));
    }
}
