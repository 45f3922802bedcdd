use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use pdfsummary::{
    config::{DEFAULT_MAX_WORDS, DEFAULT_MAX_WORDS_LIMIT},
    extraction::{PdfTextExtractor, TextExtractor},
    logging,
    processing::{BudgetPolicy, SummaryOutcome, build_outcome},
};

#[derive(Parser)]
#[command(
    name = "summarize-pdf",
    about = "Print a word-budgeted extractive summary of a PDF or text file"
)]
struct Cli {
    /// Document to summarize.
    path: PathBuf,
    /// Maximum words in the summary (clamped to 1..=500).
    #[arg(long, default_value_t = DEFAULT_MAX_WORDS as i64, allow_negative_numbers = true)]
    max_words: i64,
    /// Treat the input as plain UTF-8 text instead of a PDF.
    #[arg(long)]
    text: bool,
    /// Print the summary and its counters as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    logging::init_cli_tracing();
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let policy = BudgetPolicy::new(DEFAULT_MAX_WORDS, DEFAULT_MAX_WORDS_LIMIT);
    let budget = policy.clamp(cli.max_words);
    let raw = read_document(&cli).await?;
    let outcome = build_outcome(&raw, budget);
    print_outcome(&outcome, cli.json)
}

async fn read_document(cli: &Cli) -> Result<String> {
    if cli.text {
        return fs::read_to_string(&cli.path)
            .with_context(|| format!("failed to read text file at {}", cli.path.display()));
    }
    let bytes = fs::read(&cli.path)
        .with_context(|| format!("failed to read PDF at {}", cli.path.display()))?;
    PdfTextExtractor::new()
        .extract_text(bytes)
        .await
        .with_context(|| format!("failed to extract text from {}", cli.path.display()))
}

fn print_outcome(outcome: &SummaryOutcome, as_json: bool) -> Result<()> {
    if as_json {
        let rendered =
            serde_json::to_string_pretty(outcome).context("failed to serialize summary")?;
        println!("{rendered}");
    } else {
        println!("{}", outcome.summary);
    }
    Ok(())
}
