//! Synthetic storage history loader.
//!
//! Generates a disk-usage time series for one host (a two-segment linear
//! trend with small uniform noise, never decreasing, capped at 100%) and
//! bulk-loads it into an Elasticsearch index for dashboards and demos.
//!
//! # Crates
//!
//! - `storage_series_generator` - trend configuration and lazy point generation
//! - `storage_populate_elasticsearch` - index recreation and bulk loading
//!
//! # CLI Usage
//!
//! ```bash
//! ELASTIC_HOST=https://localhost:9200 ELASTIC_API_KEY=... synthetic-storage
//!
//! # Reproducible noise, custom index
//! synthetic-storage --seed 42 --elastic-index storage-demo
//!
//! # Print the plan without touching Elasticsearch
//! synthetic-storage --dry-run
//! ```

pub mod config;
pub mod populate;

pub use storage_populate_elasticsearch as elasticsearch;
pub use storage_series_generator as generator;
