//! Word-sense documents and the corpus that holds them.
//!
//! Every document's text ends with exactly one `Lemmas:` line. The
//! post-processor reads candidates back out of that line, so composition
//! here and [`lemma_line`] must stay in agreement.

use std::io::{BufRead, Write};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::datasets::AuxiliaryEntry;
use crate::lexicon::Sense;
use crate::pos::PartOfSpeech;

/// Line prefix carrying a document's surface forms
pub const LEMMAS_PREFIX: &str = "Lemmas:";

lazy_static! {
    static ref LEMMAS_LINE: Regex = Regex::new(r"(?m)^[ \t]*Lemmas:[ \t]*(.*?)[ \t]*$").unwrap();
}

/// One indexed unit of meaning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub source: DocumentSource,
}

/// Where a document came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentSource {
    Lexical,
    Auxiliary { dataset: String },
}

impl Document {
    /// Compose a document for a lexical sense
    pub fn from_sense(sense: &Sense) -> Self {
        let pos = PartOfSpeech::from_code(&sense.pos);
        let examples: Vec<String> = sense.examples.iter().map(|e| single_line(e)).collect();
        let lemmas: Vec<String> = sense.lemmas.iter().map(|l| single_line(l)).collect();

        let text = format!(
            "{}\nPart of speech: {}\nExamples: {}\n{} {}",
            neutralize(&sense.definition),
            pos,
            examples.join(", "),
            LEMMAS_PREFIX,
            lemmas.join(", "),
        );

        Self {
            id: sense.id.clone(),
            text,
            metadata: Some(DocumentMetadata {
                source: DocumentSource::Lexical,
            }),
        }
    }

    /// Compose a document for an auxiliary `(word, definition)` entry
    pub fn from_auxiliary(dataset: &str, entry: &AuxiliaryEntry) -> Self {
        let mut text = neutralize(&entry.definition);
        if let Some(pos) = entry.pos {
            text.push_str(&format!("\nPart of speech: {}", pos));
        }
        text.push_str(&format!("\n{} {}", LEMMAS_PREFIX, single_line(&entry.word)));

        Self {
            id: entry.word.clone(),
            text,
            metadata: Some(DocumentMetadata {
                source: DocumentSource::Auxiliary {
                    dataset: dataset.to_string(),
                },
            }),
        }
    }

    /// Raw contents of the `Lemmas:` line, if present
    pub fn lemma_line(&self) -> Option<&str> {
        lemma_line(&self.text)
    }
}

/// Locate the `Lemmas:` line in a document text and return what follows the prefix
pub fn lemma_line(text: &str) -> Option<&str> {
    LEMMAS_LINE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Free text must not start a line with the lemma prefix
fn neutralize(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim_start().starts_with(LEMMAS_PREFIX) {
                line.replacen(LEMMAS_PREFIX, "Lemmas -", 1)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ").trim().to_string()
}

/// Ordered, immutable collection of documents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    pub(crate) fn from_documents(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Persist as JSON lines, one document per line, in corpus order
    pub fn write_jsonl<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for doc in &self.documents {
            serde_json::to_writer(&mut writer, doc)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }

    /// Read a corpus previously written by [`Corpus::write_jsonl`]
    pub fn read_jsonl<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut documents = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let doc: Document = serde_json::from_str(&line)?;
            documents.push(doc);
        }
        Ok(Self { documents })
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mouse_sense() -> Sense {
        Sense {
            id: "oewn-02333689-n".to_string(),
            definition: "any of numerous small rodents".to_string(),
            pos: "n".to_string(),
            examples: vec!["a mouse in the wall".to_string()],
            lemmas: vec!["mouse".to_string(), "field mouse".to_string()],
        }
    }

    #[test]
    fn test_sense_document_text_layout() {
        let doc = Document::from_sense(&mouse_sense());
        assert_eq!(
            doc.text,
            "any of numerous small rodents\nPart of speech: noun\nExamples: a mouse in the wall\nLemmas: mouse, field mouse"
        );
        assert_eq!(doc.id, "oewn-02333689-n");
        assert_eq!(doc.lemma_line(), Some("mouse, field mouse"));
    }

    #[test]
    fn test_unknown_pos_code_renders_unknown() {
        let mut sense = mouse_sense();
        sense.pos = "q".to_string();
        let doc = Document::from_sense(&sense);
        assert!(doc.text.contains("Part of speech: unknown"));
    }

    #[test]
    fn test_auxiliary_document_text_layout() {
        let entry = AuxiliaryEntry {
            word: "vault".to_string(),
            definition: "a secure room for valuables".to_string(),
            pos: None,
        };
        let doc = Document::from_auxiliary("desc.json", &entry);
        assert_eq!(doc.text, "a secure room for valuables\nLemmas: vault");
        assert_eq!(
            doc.metadata.unwrap().source,
            DocumentSource::Auxiliary {
                dataset: "desc.json".to_string()
            }
        );
    }

    #[test]
    fn test_free_text_lemma_prefix_is_neutralized() {
        let entry = AuxiliaryEntry {
            word: "trick".to_string(),
            definition: "first line\nLemmas: decoy".to_string(),
            pos: Some(PartOfSpeech::Noun),
        };
        let doc = Document::from_auxiliary("defi.json", &entry);
        let count = doc.text.lines().filter(|l| l.starts_with(LEMMAS_PREFIX)).count();
        assert_eq!(count, 1);
        assert_eq!(doc.lemma_line(), Some("trick"));
    }

    #[test]
    fn test_lemma_line_missing() {
        assert_eq!(lemma_line("just a gloss\nExamples: none"), None);
    }

    #[test]
    fn test_lemma_line_tolerates_indentation_and_trailing_space() {
        assert_eq!(lemma_line("gloss\n    Lemmas: a, b \n"), Some("a, b"));
    }

    #[test]
    fn test_jsonl_round_trip_preserves_order() {
        let corpus = Corpus::from_documents(vec![
            Document::from_sense(&mouse_sense()),
            Document {
                id: "bank".to_string(),
                text: "Lemmas: bank".to_string(),
                metadata: None,
            },
        ]);

        let mut buf = Vec::new();
        corpus.write_jsonl(&mut buf).unwrap();
        let read = Corpus::read_jsonl(buf.as_slice()).unwrap();

        assert_eq!(read, corpus);
    }
}
