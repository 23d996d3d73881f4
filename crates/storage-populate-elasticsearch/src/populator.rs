//! Elasticsearch populator for synthetic storage series.

use crate::bulk::{BulkItemFailure, DEFAULT_CHUNK_SIZE};
use crate::error::PopulatorError;
use crate::sink::{BulkSink, ClusterInfo};
use std::time::{Duration, Instant};
use storage_series_generator::{DataPoint, StorageDocument};
use tracing::{debug, info, warn};

/// Metrics from a populate operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of documents sent.
    pub docs_sent: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating data.
    pub generation_duration: Duration,
    /// Time spent in bulk requests.
    pub write_duration: Duration,
    /// Number of bulk requests executed.
    pub chunk_count: u64,
}

impl PopulateMetrics {
    /// Calculate documents per second.
    pub fn docs_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.docs_sent as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Result of a bulk load: how many documents landed and which did not.
#[derive(Debug, Clone, Default)]
pub struct BulkOutcome {
    pub success_count: u64,
    pub failures: Vec<BulkItemFailure>,
    pub metrics: PopulateMetrics,
}

impl BulkOutcome {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Convert to an error if any document was rejected.
    pub fn into_result(self) -> Result<Self, PopulatorError> {
        match self.failures.first() {
            None => Ok(self),
            Some(first) => Err(PopulatorError::PartialFailure {
                failed: self.failures.len(),
                first: first.to_string(),
            }),
        }
    }
}

/// Populator that recreates an index and bulk-loads a series into it.
pub struct ElasticsearchPopulator<S> {
    sink: S,
    index: String,
    chunk_size: usize,
}

impl<S: BulkSink> ElasticsearchPopulator<S> {
    /// Create a new populator writing to `index`.
    pub fn new(sink: S, index: impl Into<String>) -> Self {
        Self {
            sink,
            index: index.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set the number of documents per bulk request.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Target index name.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Get a reference to the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Verify the store is reachable.
    pub async fn check_connection(&self) -> Result<ClusterInfo, PopulatorError> {
        let info = self
            .sink
            .info()
            .await
            .map_err(|e| PopulatorError::Connection(e.to_string()))?;
        info!("Connected to Elasticsearch v{}", info.version.number);
        Ok(info)
    }

    /// Delete the index if it exists. Returns whether it was deleted.
    ///
    /// The index is created again implicitly by the first bulk write.
    pub async fn recreate_index(&self) -> Result<bool, PopulatorError> {
        if !self.sink.index_exists(&self.index).await? {
            debug!("Index '{}' does not exist", self.index);
            return Ok(false);
        }
        info!("Deleting index: {}", self.index);
        self.sink.delete_index(&self.index).await?;
        Ok(true)
    }

    /// Drain `points` into bulk requests of at most `chunk_size` documents.
    ///
    /// Rejected documents are collected, not retried; every chunk is sent
    /// regardless of earlier item failures.
    pub async fn populate<I>(&self, points: I) -> Result<BulkOutcome, PopulatorError>
    where
        I: IntoIterator<Item = DataPoint>,
    {
        let start_time = Instant::now();
        let mut outcome = BulkOutcome::default();
        let mut points = points.into_iter();

        info!(
            "Populating index '{}' (chunk size: {})",
            self.index, self.chunk_size
        );

        loop {
            let gen_start = Instant::now();
            let chunk: Vec<StorageDocument> = points
                .by_ref()
                .take(self.chunk_size)
                .map(|point| point.to_document())
                .collect();
            outcome.metrics.generation_duration += gen_start.elapsed();

            if chunk.is_empty() {
                break;
            }

            let write_start = Instant::now();
            let response = self.sink.bulk(&self.index, &chunk).await?;
            outcome.metrics.write_duration += write_start.elapsed();

            if response.items.len() != chunk.len() {
                return Err(PopulatorError::UnexpectedResponse(format!(
                    "sent {} documents, got {} item results",
                    chunk.len(),
                    response.items.len()
                )));
            }

            let base = outcome.metrics.docs_sent;
            for (offset, item) in response.items.into_iter().enumerate() {
                if item.is_success() {
                    outcome.success_count += 1;
                } else {
                    let failure = BulkItemFailure {
                        position: base + offset as u64,
                        status: item.status,
                        error: item.error.unwrap_or(serde_json::Value::Null),
                    };
                    warn!("Bulk item rejected: {}", failure);
                    outcome.failures.push(failure);
                }
            }

            outcome.metrics.docs_sent += chunk.len() as u64;
            outcome.metrics.chunk_count += 1;

            debug!(
                "Chunk {} complete: {} documents sent so far, {} failed",
                outcome.metrics.chunk_count,
                outcome.metrics.docs_sent,
                outcome.failures.len()
            );
        }

        outcome.metrics.total_duration = start_time.elapsed();

        info!(
            "Population complete: {} succeeded, {} failed in {:?} ({:.2} docs/sec)",
            outcome.success_count,
            outcome.failures.len(),
            outcome.metrics.total_duration,
            outcome.metrics.docs_per_second()
        );

        Ok(outcome)
    }
}
