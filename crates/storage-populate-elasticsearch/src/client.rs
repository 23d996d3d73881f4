//! Elasticsearch HTTP client.

use crate::bulk::{encode_bulk_body, BulkResponse};
use crate::error::PopulatorError;
use crate::sink::{BulkSink, ClusterInfo};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use storage_series_generator::StorageDocument;
use tracing::debug;

/// Default request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const NDJSON: &str = "application/x-ndjson";

/// Elasticsearch REST client authenticated with an API key.
#[derive(Clone)]
pub struct ElasticsearchClient {
    http: Client,
    endpoint: String,
}

impl ElasticsearchClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Base URL (e.g., "https://localhost:9200")
    /// * `api_key` - Encoded API key sent as `Authorization: ApiKey <key>`
    /// * `timeout` - Per-request timeout
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, PopulatorError> {
        let endpoint = endpoint.trim().trim_end_matches('/').to_string();
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(PopulatorError::InvalidConfig(format!(
                "endpoint must start with http:// or https://, got '{endpoint}'"
            )));
        }

        let mut auth = HeaderValue::from_str(&format!("ApiKey {api_key}")).map_err(|_| {
            PopulatorError::InvalidConfig("API key contains invalid characters".to_string())
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, endpoint })
    }

    /// Base URL without a trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }
}

/// Turn a non-success response into `PopulatorError::Status`.
async fn ensure_success(
    method: &'static str,
    path: &str,
    response: Response,
) -> Result<Response, PopulatorError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(PopulatorError::Status {
        method,
        path: path.to_string(),
        status: status.as_u16(),
        body,
    })
}

#[async_trait::async_trait]
impl BulkSink for ElasticsearchClient {
    async fn info(&self) -> Result<ClusterInfo, PopulatorError> {
        let response = self.http.get(self.url("/")).send().await?;
        let response = ensure_success("GET", "/", response).await?;
        Ok(response.json::<ClusterInfo>().await?)
    }

    async fn index_exists(&self, index: &str) -> Result<bool, PopulatorError> {
        let response = self.http.head(self.url(index)).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            _ => {
                ensure_success("HEAD", index, response).await?;
                Ok(true)
            }
        }
    }

    async fn delete_index(&self, index: &str) -> Result<(), PopulatorError> {
        let response = self.http.delete(self.url(index)).send().await?;
        ensure_success("DELETE", index, response).await?;
        Ok(())
    }

    async fn bulk(
        &self,
        index: &str,
        documents: &[StorageDocument],
    ) -> Result<BulkResponse, PopulatorError> {
        let body = encode_bulk_body(index, documents)?;
        debug!(
            "POST /_bulk with {} documents ({} bytes)",
            documents.len(),
            body.len()
        );

        let response = self
            .http
            .post(self.url("/_bulk"))
            .header(CONTENT_TYPE, NDJSON)
            .body(body)
            .send()
            .await?;
        let response = ensure_success("POST", "/_bulk", response).await?;
        let bytes = response.bytes().await?;
        BulkResponse::from_slice(&bytes)
    }
}
