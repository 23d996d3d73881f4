//! `_bulk` request encoding and response decoding.

use crate::error::PopulatorError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use storage_series_generator::StorageDocument;

/// Default number of documents per `_bulk` request.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Encode documents as an NDJSON `_bulk` body of `index` actions.
pub fn encode_bulk_body(
    index: &str,
    documents: &[StorageDocument],
) -> Result<String, serde_json::Error> {
    let action = serde_json::to_string(&serde_json::json!({ "index": { "_index": index } }))?;

    let mut body = String::new();
    for doc in documents {
        body.push_str(&action);
        body.push('\n');
        body.push_str(&serde_json::to_string(doc)?);
        body.push('\n');
    }
    Ok(body)
}

/// Per-item outcome of a bulk request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BulkItemResult {
    #[serde(rename = "_index", default)]
    pub index: Option<String>,
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub status: u16,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl BulkItemResult {
    /// An item the server accepted.
    pub fn created(index: &str, id: impl Into<String>) -> Self {
        Self {
            index: Some(index.to_string()),
            id: Some(id.into()),
            status: 201,
            error: None,
        }
    }

    /// An item the server rejected.
    pub fn rejected(index: &str, status: u16, error: serde_json::Value) -> Self {
        Self {
            index: Some(index.to_string()),
            id: None,
            status,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && (200..300).contains(&self.status)
    }
}

/// Decoded `_bulk` response.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkResponse {
    /// Server-side processing time in milliseconds.
    pub took: u64,
    /// Whether any item failed.
    pub errors: bool,
    /// Item results in request order.
    pub items: Vec<BulkItemResult>,
}

#[derive(Deserialize)]
struct RawBulkResponse {
    #[serde(default)]
    took: u64,
    #[serde(default)]
    errors: bool,
    items: Vec<BTreeMap<String, BulkItemResult>>,
}

impl BulkResponse {
    /// Build a response from item results.
    pub fn from_items(items: Vec<BulkItemResult>) -> Self {
        let errors = items.iter().any(|item| !item.is_success());
        Self {
            took: 0,
            errors,
            items,
        }
    }

    /// Decode a response body. Each item is keyed by its action name.
    pub fn from_slice(body: &[u8]) -> Result<Self, PopulatorError> {
        let raw: RawBulkResponse = serde_json::from_slice(body)?;
        let items = raw
            .items
            .into_iter()
            .map(|mut entry| {
                entry.pop_first().map(|(_, result)| result).ok_or_else(|| {
                    PopulatorError::UnexpectedResponse("empty bulk item".to_string())
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            took: raw.took,
            errors: raw.errors,
            items,
        })
    }
}

/// A document the server rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkItemFailure {
    /// Position of the document in the series.
    pub position: u64,
    pub status: u16,
    pub error: serde_json::Value,
}

impl fmt::Display for BulkItemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "document {} (status {}): {}",
            self.position, self.status, self.error
        )
    }
}
