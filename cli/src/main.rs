use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use linereduce_core::{Coordinator, TaskSource};
use linereduce_word_count::WordCount;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Single-host map-reduce over a newline-delimited input file.
#[derive(Debug, Parser)]
#[command(name = "linereduce")]
struct Args {
    /// Input file; every line becomes one task.
    input: PathBuf,

    /// Worker pool size. Defaults to the number of available CPUs.
    #[arg(long)]
    workers: Option<usize>,

    /// Emit the final result as a JSON object instead of plain text.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let workers = args.workers.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    });
    info!(input = %args.input.display(), workers, "starting run");

    let source = TaskSource::open(&args.input)?;
    let result = Coordinator::new(workers)
        .run(source, Arc::new(WordCount), &WordCount)
        .await
        .context("map-reduce run failed")?;

    // BTreeMap for a stable, key-sorted listing.
    let sorted: BTreeMap<String, i64> = result.into_iter().collect();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&sorted)?);
    } else {
        for (key, value) in &sorted {
            println!("{key} {value}");
        }
    }
    Ok(())
}
