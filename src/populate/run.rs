//! Populate command runner.

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Args;
use rand::Rng;
use std::time::Duration;
use storage_populate_elasticsearch::{
    BulkOutcome, BulkSink, ConnectionConfig, ElasticsearchClient, ElasticsearchPopulateArgs,
    ElasticsearchPopulator, DEFAULT_REQUEST_TIMEOUT,
};
use storage_series_generator::{SeriesGenerator, TrendConfig, TrendPlan};

use super::{mask_api_key, mask_url_credentials};
use crate::config::parse_duration;

/// Options for the populate command.
#[derive(Args, Clone, Debug)]
pub struct PopulateOpts {
    #[command(flatten)]
    pub elastic: ElasticsearchPopulateArgs,

    /// Random seed for the noise (same seed and end time = same series)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Request timeout for Elasticsearch calls (e.g., "30s", "2m"); defaults to 30s
    #[arg(long, value_parser = parse_duration)]
    pub request_timeout: Option<Duration>,

    /// Dry-run mode: validate configuration and print the plan without contacting Elasticsearch
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the populate command: recreate the index and load a fresh series.
pub async fn run_populate(opts: PopulateOpts) -> anyhow::Result<()> {
    // Connection settings are checked before anything is generated or sent.
    let connection = opts.elastic.connection()?;

    let config = TrendConfig::default();
    let now = Utc::now();

    println!("Target: {}", mask_url_credentials(&connection.endpoint));
    tracing::debug!("API key: {}", mask_api_key(&connection.api_key));

    match opts.seed {
        Some(seed) => {
            let generator = SeriesGenerator::with_seed(config, seed)?;
            run_with_generator(&opts, &connection, generator, now).await
        }
        None => {
            let generator = SeriesGenerator::from_entropy(config)?;
            run_with_generator(&opts, &connection, generator, now).await
        }
    }
}

async fn run_with_generator<R: Rng>(
    opts: &PopulateOpts,
    connection: &ConnectionConfig,
    generator: SeriesGenerator<R>,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    if opts.dry_run {
        tracing::info!("[DRY-RUN] Would populate index '{}'", connection.index);
        print_plan(&generator.plan(now)?);
        tracing::info!("[DRY-RUN] Configuration validated successfully");
        return Ok(());
    }

    let client = ElasticsearchClient::new(
        &connection.endpoint,
        &connection.api_key,
        opts.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
    )?;
    let populator = ElasticsearchPopulator::new(client, connection.index.clone());

    ingest(&populator, generator, now).await?;
    Ok(())
}

/// Check connectivity, recreate the index and bulk-load the series ending at `now`.
///
/// Fails if the connection check fails, if the index cannot be recreated, if
/// a bulk request fails outright, or if any document is rejected.
pub async fn ingest<S: BulkSink, R: Rng>(
    populator: &ElasticsearchPopulator<S>,
    generator: SeriesGenerator<R>,
    now: DateTime<Utc>,
) -> anyhow::Result<BulkOutcome> {
    let info = populator.check_connection().await?;
    println!("Connected to Elasticsearch v{}", info.version.number);

    let series = generator.points(now)?;
    print_plan(series.plan());

    if populator
        .recreate_index()
        .await
        .with_context(|| format!("Failed to recreate index '{}'", populator.index()))?
    {
        println!("Deleted existing index '{}'", populator.index());
    }

    println!("Sending data to index '{}'...", populator.index());
    let outcome = populator
        .populate(series)
        .await
        .context("Bulk write failed")?;

    print_summary(&outcome);
    Ok(outcome.into_result()?)
}

fn print_plan(plan: &TrendPlan) {
    println!("Data range: {} to {}", plan.start_time, plan.end_time);
    println!("{}", "-".repeat(40));
    println!("Trend change point: {}", plan.change_point_time);
    println!(
        "   (point {}, {} hours after the first point)",
        plan.change_index,
        (plan.change_point_time - plan.start_time).num_hours()
    );
    println!("{}", "-".repeat(40));
}

fn print_summary(outcome: &BulkOutcome) {
    println!("Done: {} succeeded", outcome.success_count);
    if let Some(first) = outcome.failures.first() {
        println!();
        println!("=== Bulk errors ===");
        println!("{} document(s) failed to index.", outcome.failure_count());
        println!("{first}");
    }
}
