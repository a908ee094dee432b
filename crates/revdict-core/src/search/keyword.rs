use std::path::{Path, PathBuf};

use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, Query, TermQuery};
use tantivy::schema::*;
use tantivy::tokenizer::TokenStream;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};
use tracing::{debug, info};

use crate::document::Corpus;
use crate::error::IndexError;
use crate::search::{IndexHandle, SearchHit, SemanticIndex};

/// Writer heap budget shared by all indexing threads
const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Keyword search index using Tantivy for BM25 matching
///
/// Stands in for an embedding service: ranking is lexical rather than
/// semantic, but the contract (stored id + full text, best-first hits) is
/// the same.
///
/// # Schema
///
/// - `id`: document identifier (STRING | STORED)
/// - `text`: full document text (TEXT | STORED)
///
/// # Example
///
/// ```no_run
/// use revdict_core::search::{KeywordIndex, SemanticIndex};
/// # use revdict_core::Corpus;
///
/// # fn run(corpus: Corpus) -> Result<(), revdict_core::IndexError> {
/// let mut index = KeywordIndex::open_or_create(std::path::Path::new("./revdict-index"))?;
/// index.index(&corpus)?;
///
/// for hit in index.search("a small rodent", 10)? {
///     println!("{} ({:.3})", hit.id, hit.score);
/// }
/// # Ok(())
/// # }
/// # fn main() {}
/// ```
pub struct KeywordIndex {
    index: Index,
    reader: IndexReader,
    id_field: Field,
    text_field: Field,
    location: Option<PathBuf>,
}

impl KeywordIndex {
    fn schema() -> Schema {
        let mut schema_builder = Schema::builder();
        schema_builder.add_text_field("id", STRING | STORED);
        schema_builder.add_text_field("text", TEXT | STORED);
        schema_builder.build()
    }

    fn from_index(index: Index, location: Option<PathBuf>) -> Result<Self, IndexError> {
        let schema = index.schema();
        let id_field = schema.get_field("id")?;
        let text_field = schema.get_field("text")?;
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        Ok(Self {
            index,
            reader,
            id_field,
            text_field,
            location,
        })
    }

    /// Open the index stored in `index_path`, creating an empty one if absent
    pub fn open_or_create(index_path: &Path) -> Result<Self, IndexError> {
        let index = if index_path.join("meta.json").exists() {
            Index::open_in_dir(index_path)?
        } else {
            std::fs::create_dir_all(index_path).map_err(|source| IndexError::Io {
                path: index_path.to_path_buf(),
                source,
            })?;
            Index::create_in_dir(index_path, Self::schema())?
        };

        Self::from_index(index, Some(index_path.to_path_buf()))
    }

    /// Create an in-memory index (for testing)
    pub fn in_memory() -> Result<Self, IndexError> {
        Self::from_index(Index::create_in_ram(Self::schema()), None)
    }

    /// Number of searchable documents
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Terms of `query` as the `text` field's analyzer produces them
    ///
    /// Descriptions are free text, so no query grammar applies: quotes,
    /// colons and brackets are separators like any other punctuation.
    fn query_terms(&self, query: &str) -> Result<Vec<Term>, IndexError> {
        let mut analyzer = self.index.tokenizer_for_field(self.text_field)?;
        let mut stream = analyzer.token_stream(query);
        let mut terms = Vec::new();
        while let Some(token) = stream.next() {
            terms.push(Term::from_field_text(self.text_field, &token.text));
        }
        Ok(terms)
    }
}

impl SemanticIndex for KeywordIndex {
    /// Replace the index contents with `corpus`, committing once
    fn index(&mut self, corpus: &Corpus) -> Result<IndexHandle, IndexError> {
        let mut index_writer: IndexWriter = self.index.writer(WRITER_HEAP_BYTES)?;
        index_writer.delete_all_documents()?;

        for document in corpus {
            let mut doc = TantivyDocument::new();
            doc.add_text(self.id_field, &document.id);
            doc.add_text(self.text_field, &document.text);
            index_writer.add_document(doc)?;
        }

        index_writer.commit()?;
        self.reader.reload()?;

        info!(documents = corpus.len(), location = ?self.location, "Indexed corpus");
        Ok(IndexHandle {
            documents: corpus.len(),
            location: self.location.clone(),
        })
    }

    fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, IndexError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let terms = self.query_terms(query)?;
        if terms.is_empty() {
            return Err(IndexError::Lookup {
                query: query.to_string(),
                reason: "no searchable terms".to_string(),
            });
        }
        let term_count = terms.len();
        let clauses: Vec<(Occur, Box<dyn Query>)> = terms
            .into_iter()
            .map(|term| {
                let clause: Box<dyn Query> =
                    Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs));
                (Occur::Should, clause)
            })
            .collect();
        let any_term = BooleanQuery::new(clauses);

        let searcher = self.reader.searcher();
        let top_docs = searcher.search(&any_term, &TopDocs::with_limit(k))?;
        debug!(query, terms = term_count, hits = top_docs.len(), "Keyword search");

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher.doc(doc_address)?;
            let field_text = |field: Field| {
                doc.get_first(field)
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string()
            };
            hits.push(SearchHit {
                id: field_text(self.id_field),
                text: field_text(self.text_field),
                score,
            });
        }

        Ok(hits)
    }
}
