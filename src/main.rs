//! # Curator CLI
//!
//! Command-line entry points for the ingestion pipeline:
//!
//! - `run`: the batch entry point for scheduled ingestion — crawls every
//!   configured seed URL, summarizes, and submits to the article store,
//!   then reports success/failure counts
//! - `crawl`: single-URL diagnostic that prints the extracted article as
//!   JSON without touching the provider or the store

use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use curator::batch::{BatchRunner, derive_source};
use curator::config::Config;
use curator::crawler::{CrawlOrchestrator, CrawlerConfig};
use curator::gemini::GenerativeClient;
use curator::ingest::IngestClient;
use curator::summarizer::{CredentialPool, Summarizer};

#[derive(Parser)]
#[command(author, version, about = "Crawl, summarize, and ingest web articles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl and ingest every configured seed URL
    Run(RunArgs),

    /// Crawl a single URL and print the extracted article
    Crawl(CrawlArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Override the configured seed URLs (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    urls: Option<Vec<String>>,

    /// Number of outer crawl attempts per URL
    #[arg(short, long, default_value = "3")]
    retries: u32,
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// URL to crawl
    #[arg(required = true)]
    url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run_batch(args).await,
        Commands::Crawl(args) => crawl_single(args).await,
    }
}

async fn run_batch(args: RunArgs) -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;

    let urls = args.urls.unwrap_or_else(|| config.seed_urls.clone());
    if urls.is_empty() {
        anyhow::bail!("no seed URLs configured; set CRAWL_URLS or pass --urls");
    }

    let crawler_config = CrawlerConfig::builder().max_retries(args.retries).build();
    let orchestrator = CrawlOrchestrator::from_config(&crawler_config);

    let pool = Arc::new(CredentialPool::new(config.api_keys.clone())?);
    let summarizer = Summarizer::new(
        GenerativeClient::with_base_url(config.provider_base_url.as_str()),
        pool,
        config.instructions.as_str(),
    )
    .with_models(&config.summary_model, &config.bias_model);

    let ingest = IngestClient::new(config.ingest_base_url.as_str());

    let runner = BatchRunner::new(orchestrator, summarizer, ingest);
    let summary = runner.run(&urls).await;

    println!(
        "Crawl complete. Success: {}, Failures: {}",
        summary.success_count, summary.failure_count
    );
    Ok(())
}

async fn crawl_single(args: CrawlArgs) -> anyhow::Result<()> {
    let source = derive_source(&args.url)
        .with_context(|| format!("could not derive a source from {}", args.url))?;

    let orchestrator = CrawlOrchestrator::with_default_strategies();
    match orchestrator.crawl(&args.url, &source).await {
        Some(article) => {
            println!("{}", serde_json::to_string_pretty(&article)?);
            Ok(())
        }
        None => anyhow::bail!("no article could be extracted from {}", args.url),
    }
}
