//! BulkSink trait definition.
//!
//! This trait abstracts the document store behind the handful of calls the
//! populator needs, so the ingestion flow can run against an in-memory sink
//! in tests.

use crate::bulk::BulkResponse;
use crate::error::PopulatorError;
use serde::Deserialize;
use storage_series_generator::StorageDocument;

/// Server identification returned by the root endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClusterInfo {
    #[serde(default)]
    pub cluster_name: Option<String>,
    pub version: VersionInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionInfo {
    pub number: String,
}

/// Trait for writing documents to an index-based document store.
#[async_trait::async_trait]
pub trait BulkSink: Send + Sync {
    /// Fetch server information; doubles as the connectivity check.
    async fn info(&self) -> Result<ClusterInfo, PopulatorError>;

    /// Whether the index exists.
    async fn index_exists(&self, index: &str) -> Result<bool, PopulatorError>;

    /// Delete the index.
    async fn delete_index(&self, index: &str) -> Result<(), PopulatorError>;

    /// Index a batch of documents in one request.
    ///
    /// Item results are returned in the order of `documents`.
    async fn bulk(
        &self,
        index: &str,
        documents: &[StorageDocument],
    ) -> Result<BulkResponse, PopulatorError>;
}
