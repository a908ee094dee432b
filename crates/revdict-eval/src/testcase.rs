//! Labeled test-case parsing
//!
//! One case per line, tab-separated: the first field is the query, the last
//! field the expected answers as an alternation (`word1|word2|...`). Any
//! fields in between are ignored.

use anyhow::Context;
use revdict_core::normalize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// A labeled query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub query: String,
    /// Alternation exactly as written in the file
    pub alternation: String,
    /// Normalized expected answers
    pub expected: Vec<String>,
}

impl TestCase {
    pub fn new(query: &str, alternation: &str) -> Self {
        let expected = alternation
            .split('|')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(normalize)
            .collect();
        Self {
            query: query.to_string(),
            alternation: alternation.to_string(),
            expected,
        }
    }
}

/// A line that could not be read as a test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatMismatch {
    /// 1-based line number
    pub line: usize,
    pub content: String,
}

/// Parsed test-case file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestSuite {
    pub cases: Vec<TestCase>,
    pub blank_lines: usize,
    pub format_mismatches: Vec<FormatMismatch>,
}

impl TestSuite {
    /// Parse test cases from file contents
    pub fn parse(content: &str) -> Self {
        let mut suite = TestSuite::default();

        for (i, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                suite.blank_lines += 1;
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            let query = fields[0].trim();
            let answers = fields[fields.len() - 1].trim();
            let case = TestCase::new(query, answers);

            if fields.len() < 2 || query.is_empty() || case.expected.is_empty() {
                warn!(line = i + 1, content = %line, "Skipping malformed test case");
                suite.format_mismatches.push(FormatMismatch {
                    line: i + 1,
                    content: line.to_string(),
                });
                continue;
            }

            suite.cases.push(case);
        }

        suite
    }

    /// Read and parse a test-case file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read test cases: {}", path.display()))?;
        let suite = Self::parse(&content);
        info!(
            path = %path.display(),
            cases = suite.cases.len(),
            skipped = suite.format_mismatches.len(),
            "Loaded test cases"
        );
        Ok(suite)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_query_first_answers_last() {
        let suite = TestSuite::parse("a place to keep money safe\tnoun\tbank|Vault\n");
        assert_eq!(suite.cases.len(), 1);
        assert_eq!(suite.cases[0].query, "a place to keep money safe");
        assert_eq!(suite.cases[0].alternation, "bank|Vault");
        assert_eq!(suite.cases[0].expected, vec!["bank", "vault"]);
    }

    #[test]
    fn test_expected_answers_are_normalized() {
        let suite = TestSuite::parse("frozen dessert\tIce Cream|gelato\n");
        assert_eq!(suite.cases[0].expected, vec!["ice_cream", "gelato"]);
    }

    #[test]
    fn test_blank_and_mismatched_lines_are_counted() {
        let content = "small rodent\tmouse\n\n   \nno tab here\n\tmissing query\nempty answer\t\n";
        let suite = TestSuite::parse(content);

        assert_eq!(suite.len(), 1);
        assert_eq!(suite.blank_lines, 2);
        let lines: Vec<usize> = suite.format_mismatches.iter().map(|m| m.line).collect();
        assert_eq!(lines, vec![4, 5, 6]);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.tsv");
        fs::write(&path, "small rodent\tmouse\n").unwrap();

        let suite = TestSuite::from_file(&path).unwrap();
        assert_eq!(suite.cases[0].expected, vec!["mouse"]);
        assert!(TestSuite::from_file(dir.path().join("missing.tsv")).is_err());
    }
}
