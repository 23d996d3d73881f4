//! Elasticsearch populator for synthetic storage series.
//!
//! This crate recreates a target index and bulk-loads the points produced by
//! `storage-series-generator` into it, collecting per-document failures.
//!
//! # Example
//!
//! ```ignore
//! use storage_populate_elasticsearch::{ElasticsearchClient, ElasticsearchPopulator};
//! use storage_series_generator::{SeriesGenerator, TrendConfig};
//!
//! let client = ElasticsearchClient::new("https://localhost:9200", api_key, timeout)?;
//! let populator = ElasticsearchPopulator::new(client, "synthetic-storage-history");
//!
//! populator.check_connection().await?;
//! populator.recreate_index().await?;
//!
//! let generator = SeriesGenerator::from_entropy(TrendConfig::default())?;
//! let outcome = populator.populate(generator.points(chrono::Utc::now())?).await?;
//! println!("{} succeeded, {} failed", outcome.success_count, outcome.failure_count());
//! ```

pub mod args;
pub mod bulk;
pub mod client;
pub mod error;
pub mod populator;
pub mod sink;

pub use args::{ConnectionConfig, ElasticsearchPopulateArgs, DEFAULT_INDEX};
pub use bulk::{BulkItemFailure, BulkItemResult, BulkResponse, DEFAULT_CHUNK_SIZE};
pub use client::{ElasticsearchClient, DEFAULT_REQUEST_TIMEOUT};
pub use error::PopulatorError;
pub use populator::{BulkOutcome, ElasticsearchPopulator, PopulateMetrics};
pub use sink::{BulkSink, ClusterInfo, VersionInfo};
