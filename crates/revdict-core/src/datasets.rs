//! Supplementary word → definition datasets.
//!
//! Two on-disk formats are supported:
//!
//! - **Json**: an array of `{"word": ..., "definitions": ...}` records. The
//!   `definitions` value is kept verbatim: strings as-is, anything else as
//!   compact JSON.
//! - **Tsv**: one `word<TAB>pos<TAB>definition` entry per line. Lines with a
//!   different field count are skipped.
//!
//! Records missing a required field are collected on the dataset rather than
//! dropped, so the corpus builder can refuse to build from them.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{LoadError, MalformedRecord};
use crate::pos::PartOfSpeech;

/// Number of tab-separated fields in a flat dataset line
pub const TSV_FIELDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetFormat {
    Json,
    Tsv,
}

impl DatasetFormat {
    /// Guess from the file extension; `.json` is Json, everything else Tsv
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DatasetFormat::Json,
            _ => DatasetFormat::Tsv,
        }
    }
}

/// One `(word, definition)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxiliaryEntry {
    pub word: String,
    pub definition: String,
    pub pos: Option<PartOfSpeech>,
}

/// A parsed auxiliary dataset
#[derive(Debug, Clone, Default)]
pub struct AuxiliaryDataset {
    pub name: String,
    pub entries: Vec<AuxiliaryEntry>,
    /// Records missing a required field
    pub malformed: Vec<MalformedRecord>,
    /// Flat lines ignored because of a wrong field count
    pub skipped_lines: usize,
}

impl AuxiliaryDataset {
    /// Parse the structured (JSON) format
    pub fn from_json_str(name: &str, content: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<Value> = serde_json::from_str(content)?;
        let mut dataset = Self {
            name: name.to_string(),
            ..Default::default()
        };

        for (i, record) in records.iter().enumerate() {
            match parse_json_record(record) {
                Ok(entry) => dataset.entries.push(entry),
                Err(reason) => dataset.malformed.push(MalformedRecord {
                    dataset: name.to_string(),
                    position: i,
                    reason,
                }),
            }
        }

        Ok(dataset)
    }

    /// Parse the flat (tab-delimited) format
    pub fn from_tsv_str(name: &str, content: &str) -> Self {
        let mut dataset = Self {
            name: name.to_string(),
            ..Default::default()
        };

        for (i, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != TSV_FIELDS {
                debug!(dataset = name, line = i + 1, fields = fields.len(), "Skipping flat line");
                dataset.skipped_lines += 1;
                continue;
            }

            let (word, pos, definition) = (fields[0].trim(), fields[1].trim(), fields[2].trim());
            let reason = if word.is_empty() {
                Some("empty word field")
            } else if definition.is_empty() {
                Some("empty definition field")
            } else {
                None
            };

            match reason {
                Some(reason) => dataset.malformed.push(MalformedRecord {
                    dataset: name.to_string(),
                    position: i + 1,
                    reason: reason.to_string(),
                }),
                None => dataset.entries.push(AuxiliaryEntry {
                    word: word.to_string(),
                    definition: definition.to_string(),
                    pos: Some(PartOfSpeech::from_code(pos)),
                }),
            }
        }

        dataset
    }

    /// Read and parse one dataset file
    pub fn load(path: &Path, format: DatasetFormat) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let dataset = match format {
            DatasetFormat::Json => {
                Self::from_json_str(&name, &content).map_err(|source| LoadError::Json {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            DatasetFormat::Tsv => Self::from_tsv_str(&name, &content),
        };

        info!(
            dataset = %name,
            entries = dataset.entries.len(),
            malformed = dataset.malformed.len(),
            skipped_lines = dataset.skipped_lines,
            "Loaded auxiliary dataset"
        );
        Ok(dataset)
    }
}

fn parse_json_record(record: &Value) -> Result<AuxiliaryEntry, String> {
    let object = record
        .as_object()
        .ok_or_else(|| "record is not an object".to_string())?;

    let word = match object.get("word") {
        Some(Value::String(w)) if !w.trim().is_empty() => w.trim().to_string(),
        Some(Value::String(_)) => return Err("empty field `word`".to_string()),
        Some(_) => return Err("field `word` is not a string".to_string()),
        None => return Err("missing field `word`".to_string()),
    };

    let definition = match object.get("definitions") {
        None | Some(Value::Null) => return Err("missing field `definitions`".to_string()),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    Ok(AuxiliaryEntry {
        word,
        definition,
        pos: None,
    })
}

/// Load several datasets in parallel; results keep the order of `specs`
pub fn load_all(specs: &[(PathBuf, DatasetFormat)]) -> Result<Vec<AuxiliaryDataset>, LoadError> {
    specs
        .par_iter()
        .map(|(path, format)| AuxiliaryDataset::load(path, *format))
        .collect()
}
