//! Command implementations
//!
//! Each command takes the parsed [`Config`] and returns what it produced so
//! `main` only has to print.

use anyhow::{Context, Result};
use revdict_core::{
    BuildSummary, CandidateList, Corpus, IndexHandle, KeywordIndex, ResultProcessor,
    RuleLemmatizer, SemanticIndex,
};
use revdict_eval::reporter::{write_error_logs, ErrorLogPaths};
use revdict_eval::{Config, EvaluationReport, Evaluator, OutputFormat, Reporter, TestSuite};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Options for `build`
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Re-index a persisted corpus instead of reading the sources
    pub from_corpus: Option<PathBuf>,
}

/// Options for `evaluate`
#[derive(Debug, Clone, Default)]
pub struct EvaluateOptions {
    /// Rebuild the index before evaluating even if one exists
    pub rebuild: bool,
    pub format: Option<OutputFormat>,
    pub output_dir: Option<PathBuf>,
}

/// Build the corpus from the configured sources and index it
#[instrument(skip_all)]
pub fn build_index(
    config: &Config,
    options: &BuildOptions,
) -> Result<(IndexHandle, BuildSummary)> {
    let (corpus, summary) = match &options.from_corpus {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open corpus: {}", path.display()))?;
            let corpus = Corpus::read_jsonl(BufReader::new(file))
                .with_context(|| format!("Failed to read corpus: {}", path.display()))?;
            info!(path = %path.display(), documents = corpus.len(), "Loaded persisted corpus");
            (corpus, BuildSummary::default())
        }
        None => build_corpus(config)?,
    };

    let mut index = KeywordIndex::open_or_create(&config.corpus.index_dir)?;
    let handle = index.index(&corpus)?;
    Ok((handle, summary))
}

fn build_corpus(config: &Config) -> Result<(Corpus, BuildSummary)> {
    let lexicon = config.corpus.load_lexicon()?;
    let datasets = config.corpus.load_datasets()?;
    let (corpus, summary) = config
        .corpus
        .builder()
        .build_with_summary(&lexicon, &datasets)?;

    if let Some(path) = &config.corpus.corpus_out {
        let file = File::create(path)
            .with_context(|| format!("Failed to create corpus file: {}", path.display()))?;
        corpus
            .write_jsonl(BufWriter::new(file))
            .with_context(|| format!("Failed to write corpus: {}", path.display()))?;
        info!(path = %path.display(), documents = corpus.len(), "Persisted corpus");
    }

    Ok((corpus, summary))
}

/// Run the harness, print the report and write the error logs
#[instrument(skip_all)]
pub fn evaluate(
    config: &Config,
    options: &EvaluateOptions,
) -> Result<(EvaluationReport, ErrorLogPaths)> {
    let index_is_empty = KeywordIndex::open_or_create(&config.corpus.index_dir)?.num_docs() == 0;
    if options.rebuild || index_is_empty {
        info!(index_dir = %config.corpus.index_dir.display(), "Building index before evaluation");
        build_index(config, &BuildOptions::default())?;
    }
    let index = KeywordIndex::open_or_create(&config.corpus.index_dir)?;

    let suite = TestSuite::from_file(&config.evaluation.test_cases)?;
    let lemmatizer = query_lemmatizer(config)?;
    let report = Evaluator::new(&config.evaluation).evaluate(
        &suite,
        &index,
        &ResultProcessor::new(&lemmatizer),
    );

    let reporter = Reporter::new(options.format.unwrap_or(config.output.format));
    reporter.report(&report)?;
    if let Some(path) = &config.output.report {
        reporter.write_to_file(&report, path)?;
    }

    let output_dir = options
        .output_dir
        .as_ref()
        .unwrap_or(&config.evaluation.output_dir);
    let paths = write_error_logs(&report, output_dir)?;
    Ok((report, paths))
}

/// Query lemmatizer that accepts the configured lexicon's lemmas
fn query_lemmatizer(config: &Config) -> Result<RuleLemmatizer> {
    let lexicon = config.corpus.load_lexicon()?;
    Ok(RuleLemmatizer::from_source(&lexicon))
}

/// One-shot lookup against an existing index
pub fn query(config: &Config, text: &str) -> Result<CandidateList> {
    let index = KeywordIndex::open_or_create(&config.corpus.index_dir)?;
    let lemmatizer = query_lemmatizer(config)?;
    let hits = index.search(text, config.evaluation.effective_search_k())?;
    Ok(ResultProcessor::new(&lemmatizer).process(text, &hits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;

    fn config(dir: &Path) -> Config {
        fs::write(
            dir.join("lexicon.json"),
            r#"[{"id": "mouse.n.01", "definition": "small rodent living in walls", "pos": "n", "lemmas": ["mouse"]}]"#,
        )
        .unwrap();
        fs::write(dir.join("extra.tsv"), "vole\tn\ta small rodent of the fields\n").unwrap();
        fs::write(dir.join("cases.tsv"), "small rodent living in walls\tmouse\n").unwrap();

        Config::from_str(&format!(
            r#"
            [corpus]
            lexicon = "{dir}/lexicon.json"
            index_dir = "{dir}/index"
            corpus_out = "{dir}/corpus.jsonl"
            datasets = [{{ path = "{dir}/extra.tsv" }}]

            [evaluation]
            test_cases = "{dir}/cases.tsv"
            output_dir = "{dir}/out"
            "#,
            dir = dir.display()
        ))
        .unwrap()
    }

    #[test]
    fn test_build_then_query() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());

        let (handle, summary) = build_index(&config, &BuildOptions::default()).unwrap();
        assert_eq!(handle.documents, 2);
        assert_eq!(summary.lexical_documents, 1);
        assert_eq!(summary.auxiliary_documents, 1);
        assert!(dir.path().join("corpus.jsonl").exists());

        let candidates = query(&config, "small rodent").unwrap();
        assert!(candidates.iter().any(|c| c == "mouse"));
        assert!(candidates.iter().any(|c| c == "vole"));
    }

    #[test]
    fn test_query_with_punctuation_and_inflected_answer() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        build_index(&config, &BuildOptions::default()).unwrap();

        let candidates = query(&config, "rodent: like \"mice (small").unwrap();
        assert_eq!(candidates.into_vec(), vec!["vole"]);
    }

    #[test]
    fn test_rebuild_from_persisted_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        build_index(&config, &BuildOptions::default()).unwrap();

        let options = BuildOptions {
            from_corpus: Some(dir.path().join("corpus.jsonl")),
        };
        let (handle, summary) = build_index(&config, &options).unwrap();
        assert_eq!(handle.documents, 2);
        assert_eq!(summary, BuildSummary::default());
    }

    #[test]
    fn test_evaluate_builds_missing_index() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());

        let options = EvaluateOptions {
            format: Some(OutputFormat::Json),
            ..Default::default()
        };
        let (report, paths) = evaluate(&config, &options).unwrap();
        assert_eq!(report.scored, 1);
        assert_eq!(report.accuracy_at(1).unwrap().correct, 1);
        assert_eq!(fs::read_to_string(paths.top1).unwrap(), "");
    }
}
