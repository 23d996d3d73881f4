//! Synthetic disk-usage time series generator.
//!
//! This crate provides the `SeriesGenerator` which produces a lazy, finite
//! sequence of disk-usage samples following a two-segment linear trend with
//! bounded uniform noise. Values never decrease from one point to the next
//! and never exceed 100%.
//!
//! # Architecture
//!
//! ```text
//! TrendConfig
//!        │  validate()
//!        ▼
//! ┌───────────────────┐
//! │  SeriesGenerator  │
//! │                   │
//! │  - config         │
//! │  - rng            │
//! └────────┬──────────┘
//!          │ points(now)
//!          ▼
//!    SeriesIter ──► DataPoint { timestamp, value, host_name }
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use storage_series_generator::{SeriesGenerator, TrendConfig};
//!
//! let generator = SeriesGenerator::with_seed(TrendConfig::default(), 42).unwrap();
//! let points: Vec<_> = generator.points(Utc::now()).unwrap().collect();
//! assert_eq!(points.len(), 1000);
//! assert!(points.windows(2).all(|w| w[0].value <= w[1].value));
//! ```

pub mod config;
pub mod generator;
pub mod point;
pub mod trend;

// Re-exports for convenience
pub use config::TrendConfig;
pub use generator::{GeneratorError, SeriesGenerator, SeriesIter};
pub use point::{DataPoint, StorageDocument};
pub use trend::{apply_floor_and_cap, round_pct, TrendPlan};
