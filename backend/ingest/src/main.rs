use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::Parser;
use ingest::{IngestOptions, ingest, load_items};
use server::{retry::RetryPolicy, search::ITEM_INDEX};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON array of item documents, or a catalog snapshot
    items: PathBuf,

    #[arg(long, default_value = "http://localhost:9200")]
    elastic_url: String,

    #[arg(long, default_value = ITEM_INDEX)]
    index: String,

    #[arg(long, default_value_t = 500)]
    batch_size: usize,

    #[arg(long)]
    api_key: Option<String>,

    /// Attempts per batch
    #[arg(long, default_value_t = 3)]
    retries: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();

    let items = load_items(&args.items)?;
    println!("Loaded Items: {}\n", items.len());

    let options = IngestOptions {
        elastic_url: args.elastic_url,
        index: args.index,
        batch_size: args.batch_size,
        api_key: args.api_key,
        retry: RetryPolicy {
            max_attempts: args.retries,
            delay: Duration::from_millis(500),
            multiplier: 2.0,
        },
    };

    let report = ingest(&items, &options).await?;

    println!("\nIndexed: {}", report.indexed);
    println!("Failed: {}", report.failed);
    println!("Skipped (no itemId): {}", report.skipped);

    if report.failed > 0 {
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
