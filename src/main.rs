//! Command-line interface for synthetic-storage
//!
//! # Usage Examples
//!
//! ```bash
//! # Load 1000 hourly points ending now into the default index
//! export ELASTIC_HOST=https://localhost:9200
//! export ELASTIC_API_KEY=VnVhQ2ZHY0JDZGJrUW0tZTVhT3g6dWkybHAyYXhUTm1zeWFrdzl0dk5udw==
//! synthetic-storage
//!
//! # Deterministic noise and a longer timeout
//! synthetic-storage --seed 42 --request-timeout 2m
//!
//! # Validate settings and show the time range only
//! synthetic-storage --dry-run
//! ```
//!
//! `ELASTIC_*` variables may also be placed in a `.env` file in the working
//! directory. Variables already set in the environment take precedence.
//!
//! Logging is controlled with `RUST_LOG`, e.g.
//! `RUST_LOG=synthetic_storage=debug,storage_populate_elasticsearch=debug`.

use clap::Parser;
use synthetic_storage::populate::{run_populate, PopulateOpts};

#[derive(Parser)]
#[command(name = "synthetic-storage")]
#[command(about = "Load a synthetic disk-usage history into Elasticsearch")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    populate: PopulateOpts,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Must run before parsing so clap's `env` lookups see the file's values.
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let cli = Cli::parse();

    run_populate(cli.populate).await
}
