//! condense — summarize large documents through a size-bounded LLM.
//!
//! Reads a document, chunks it with the hierarchical splitter, runs the
//! map-reduce summarization pipeline, and prints the aggregated summary.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

use condense_chunker::{ChunkConfig, SizeEstimator};
use condense_core::config::{load_dotenv, Config};
use condense_core::document::{ContentHint, Document};
use condense_llm::create_provider;
use condense_summarize::{SummarizeError, Summarizer, SummarizerConfig};

/// Summarize a document with hierarchical chunking and map-reduce prompting.
#[derive(Parser, Debug)]
#[command(name = "condense", version, about)]
struct Cli {
    /// Input file, or `-` for stdin.
    input: PathBuf,

    /// Content hint: plain, markdown, or code (sniffed when omitted).
    #[arg(long)]
    hint: Option<String>,

    /// Chunk size bound in estimator units.
    #[arg(long, env = "CONDENSE_CHUNK_SIZE")]
    chunk_size: Option<usize>,

    /// Overlap between adjacent chunks, in estimator units.
    #[arg(long, env = "CONDENSE_OVERLAP")]
    overlap: Option<usize>,

    /// Size estimator: coarse or weighted.
    #[arg(long, env = "CONDENSE_ESTIMATOR")]
    estimator: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    load_dotenv();
    let cli = Cli::parse();
    let config = Config::from_env();
    config.validate().context("invalid configuration")?;
    config.log_summary();

    let text = read_input(&cli.input)?;
    if text.trim().is_empty() {
        bail!("input is empty");
    }

    let hint = resolve_hint(cli.hint.as_deref(), &text)?;
    let doc = Document::new(text, hint);

    let estimator: SizeEstimator = cli
        .estimator
        .as_deref()
        .unwrap_or(&config.summarize.estimator)
        .parse()
        .map_err(anyhow::Error::msg)?;
    let chunk_config = ChunkConfig {
        max_chunk_units: cli.chunk_size.unwrap_or(config.summarize.chunk_size_units),
        overlap_units: cli.overlap.unwrap_or(config.summarize.overlap_units),
        estimator,
    };

    let provider = create_provider(&config.llm, &config.ollama)
        .context("failed to create LLM provider")?;
    let summarizer = Summarizer::new(
        Arc::from(provider),
        chunk_config,
        SummarizerConfig {
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
            max_concurrency: config.summarize.max_concurrency,
            prompts_dir: config.summarize.prompts_dir.clone(),
        },
    )?;

    // Ctrl-C aborts in-flight chunk calls and skips the rest.
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("cancellation requested");
                cancel.cancel();
            }
        }
    });

    match summarizer.summarize(&doc, &cancel).await {
        Ok(Some(summary)) => {
            println!("{summary}");
            Ok(ExitCode::SUCCESS)
        }
        Ok(None) => {
            eprintln!("no summary available");
            Ok(ExitCode::FAILURE)
        }
        Err(SummarizeError::Cancelled) => {
            eprintln!("cancelled");
            Ok(ExitCode::from(130))
        }
        Err(e) => Err(e.into()),
    }
}

fn read_input(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))
    }
}

fn resolve_hint(flag: Option<&str>, text: &str) -> Result<ContentHint> {
    match flag {
        None => Ok(ContentHint::sniff(text)),
        Some("plain") => Ok(ContentHint::Plain),
        Some("markdown") | Some("md") => Ok(ContentHint::Markdown),
        Some("code") => Ok(ContentHint::Code),
        Some(other) => bail!("unknown content hint: '{other}'"),
    }
}
