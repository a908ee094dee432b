//! Reverse dictionary binary
//!
//! Entry point for building the index, running evaluations and one-shot
//! lookups.

use anyhow::Result;
use clap::{Parser, Subcommand};
use revdict_cli::{build_index, evaluate, query, BuildOptions, EvaluateOptions};
use revdict_eval::runner::NO_CANDIDATE;
use revdict_eval::{Config, OutputFormat};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "revdict")]
#[command(version, about = "Reverse dictionary: find words from their descriptions")]
struct Args {
    /// TOML configuration file
    #[arg(short, long, default_value = "revdict.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the corpus and the search index
    Build {
        /// Index a persisted corpus (JSON lines) instead of the sources
        #[arg(long)]
        from_corpus: Option<PathBuf>,
    },
    /// Score the index against the labeled test cases
    Evaluate {
        /// Rebuild the index first
        #[arg(long)]
        rebuild: bool,

        /// Report format: console, json or json_pretty
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Directory for the error logs
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Print candidate words for one description
    Query {
        /// The description to look up
        text: String,

        /// Maximum number of candidates printed
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Reports go to stdout, logs to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting revdict v{}", env!("CARGO_PKG_VERSION"));
    let config = Config::from_file(&args.config)?;

    match args.command {
        Command::Build { from_corpus } => {
            let (handle, summary) = build_index(&config, &BuildOptions { from_corpus })?;
            println!(
                "Indexed {} documents ({} lexical, {} auxiliary, {} capped) into {}",
                handle.documents,
                summary.lexical_documents,
                summary.auxiliary_documents,
                summary.capped_entries,
                config.corpus.index_dir.display()
            );
        }
        Command::Evaluate {
            rebuild,
            format,
            output_dir,
        } => {
            let options = EvaluateOptions {
                rebuild,
                format,
                output_dir,
            };
            let (_, paths) = evaluate(&config, &options)?;
            tracing::info!(
                top1 = %paths.top1.display(),
                top_max = %paths.top_max.display(),
                "Error logs written"
            );
        }
        Command::Query { text, limit } => {
            let candidates = query(&config, &text)?;
            if candidates.is_empty() {
                println!("{}", NO_CANDIDATE);
            }
            for candidate in candidates.iter().take(limit) {
                println!("{}", candidate);
            }
        }
    }

    Ok(())
}
