//! JSON reporter for evaluation results

use crate::runner::EvaluationReport;
use anyhow::Result;

/// JSON format reporter
pub struct JsonReporter;

impl JsonReporter {
    /// Format evaluation results as JSON
    ///
    /// # Arguments
    ///
    /// * `report` - The evaluation report to format
    /// * `pretty` - Whether to pretty-print the JSON
    pub fn format(report: &EvaluationReport, pretty: bool) -> Result<String> {
        let output = if pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(output)
    }
}
