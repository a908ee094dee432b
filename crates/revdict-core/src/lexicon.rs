//! Lexical knowledge base adapter.
//!
//! A lexicon is a list of word senses exported from a WordNet-style
//! database, either as one JSON array or as JSON lines.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::LoadError;

/// One word sense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    /// Stable sense id (e.g. `oewn-02333689-n`)
    pub id: String,
    pub definition: String,
    /// Single-letter part-of-speech code
    pub pos: String,
    #[serde(default)]
    pub examples: Vec<String>,
    pub lemmas: Vec<String>,
}

/// Anything that can enumerate word senses in a stable order
pub trait LexicalSource {
    fn senses(&self) -> Box<dyn Iterator<Item = &Sense> + '_>;

    /// Name used in logs
    fn name(&self) -> &str;
}

/// In-memory lexicon
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    name: String,
    senses: Vec<Sense>,
}

impl Lexicon {
    pub fn new(name: impl Into<String>, senses: Vec<Sense>) -> Self {
        Self {
            name: name.into(),
            senses,
        }
    }

    /// Load from a JSON array or JSON-lines file
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let senses = if content.trim_start().starts_with('[') {
            serde_json::from_str(&content).map_err(|source| LoadError::Json {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            parse_json_lines(path, &content)?
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        info!(lexicon = %name, senses = senses.len(), "Loaded lexicon");
        Ok(Self::new(name, senses))
    }

    pub fn len(&self) -> usize {
        self.senses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senses.is_empty()
    }
}

fn parse_json_lines(path: &Path, content: &str) -> Result<Vec<Sense>, LoadError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|source| LoadError::JsonLine {
                path: path.to_path_buf(),
                line: i + 1,
                source,
            })
        })
        .collect()
}

impl LexicalSource for Lexicon {
    fn senses(&self) -> Box<dyn Iterator<Item = &Sense> + '_> {
        Box::new(self.senses.iter())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const RODENT: &str = r#"{"id":"s1","definition":"small rodent","pos":"n","examples":[],"lemmas":["mouse"]}"#;
    const BANK: &str = r#"{"id":"s2","definition":"financial institution","pos":"n","lemmas":["bank","banking company"]}"#;

    #[test]
    fn test_load_json_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{},{}]", RODENT, BANK).unwrap();

        let lexicon = Lexicon::from_path(file.path()).unwrap();
        let ids: Vec<&str> = lexicon.senses().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2"]);
    }

    #[test]
    fn test_load_json_lines_defaults_examples() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", RODENT).unwrap();
        writeln!(file).unwrap();
        writeln!(file, "{}", BANK).unwrap();

        let lexicon = Lexicon::from_path(file.path()).unwrap();
        assert_eq!(lexicon.len(), 2);
        let bank = lexicon.senses().nth(1).unwrap();
        assert!(bank.examples.is_empty());
        assert_eq!(bank.lemmas, vec!["bank", "banking company"]);
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", RODENT).unwrap();
        writeln!(file, "{{not json").unwrap();

        let err = Lexicon::from_path(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::JsonLine { line: 2, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = Lexicon::from_path(Path::new("/nonexistent/lexicon.jsonl")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
