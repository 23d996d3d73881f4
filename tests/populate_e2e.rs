//! End-to-end populate test against an in-memory sink.
//!
//! Drives the same `ingest` path the CLI uses:
//! 1. Connectivity check
//! 2. Index recreation (delete if present)
//! 3. Lazy generation streamed into bulk requests
//! 4. Success/failure accounting

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Mutex;
use storage_populate_elasticsearch::{
    BulkItemResult, BulkResponse, BulkSink, ClusterInfo, ElasticsearchPopulateArgs,
    ElasticsearchPopulator, PopulatorError, VersionInfo, DEFAULT_INDEX,
};
use storage_series_generator::{SeriesGenerator, StorageDocument, TrendConfig};
use synthetic_storage::populate::{ingest, run_populate, PopulateOpts};

/// Records every call; optionally rejects one document position or fails a call.
#[derive(Default)]
struct StubSink {
    index_exists: bool,
    reject_position: Option<usize>,
    fail_info: bool,
    fail_delete: bool,
    fail_bulk: bool,
    calls: Mutex<Vec<String>>,
    stored: Mutex<Vec<StorageDocument>>,
}

fn status_error(method: &'static str, path: &str, status: u16) -> PopulatorError {
    PopulatorError::Status {
        method,
        path: path.to_string(),
        status,
        body: "stub failure".to_string(),
    }
}

#[async_trait::async_trait]
impl BulkSink for StubSink {
    async fn info(&self) -> Result<ClusterInfo, PopulatorError> {
        self.calls.lock().unwrap().push("info".to_string());
        if self.fail_info {
            return Err(status_error("GET", "/", 401));
        }
        Ok(ClusterInfo {
            cluster_name: None,
            version: VersionInfo {
                number: "8.15.0".to_string(),
            },
        })
    }

    async fn index_exists(&self, index: &str) -> Result<bool, PopulatorError> {
        self.calls.lock().unwrap().push(format!("exists {index}"));
        Ok(self.index_exists)
    }

    async fn delete_index(&self, index: &str) -> Result<(), PopulatorError> {
        self.calls.lock().unwrap().push(format!("delete {index}"));
        if self.fail_delete {
            return Err(status_error("DELETE", &format!("/{index}"), 403));
        }
        Ok(())
    }

    async fn bulk(
        &self,
        index: &str,
        documents: &[StorageDocument],
    ) -> Result<BulkResponse, PopulatorError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("bulk {index} {}", documents.len()));
        if self.fail_bulk {
            return Err(status_error("POST", "/_bulk", 503));
        }

        let mut stored = self.stored.lock().unwrap();
        let items = documents
            .iter()
            .map(|doc| {
                let position = stored.len();
                stored.push(doc.clone());
                if self.reject_position == Some(position) {
                    BulkItemResult::rejected(
                        index,
                        400,
                        serde_json::json!({"type": "mapper_parsing_exception", "reason": "stub"}),
                    )
                } else {
                    BulkItemResult::created(index, position.to_string())
                }
            })
            .collect();
        Ok(BulkResponse::from_items(items))
    }
}

fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn small_generator() -> SeriesGenerator {
    let config = TrendConfig::default()
        .with_point_count(10)
        .with_change_ratio(0.5);
    SeriesGenerator::with_seed(config, 42).unwrap()
}

#[tokio::test]
async fn test_ten_point_series_loads_completely() {
    tracing_subscriber::fmt()
        .with_env_filter("synthetic_storage=info,storage_populate_elasticsearch=debug")
        .try_init()
        .ok();

    let sink = StubSink {
        index_exists: true,
        ..Default::default()
    };
    let populator = ElasticsearchPopulator::new(sink, DEFAULT_INDEX);

    let outcome = ingest(&populator, small_generator(), anchor())
        .await
        .unwrap();

    assert_eq!(outcome.success_count, 10);
    assert_eq!(outcome.failure_count(), 0);

    let calls = populator.sink().calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![
            "info".to_string(),
            format!("exists {DEFAULT_INDEX}"),
            format!("delete {DEFAULT_INDEX}"),
            format!("bulk {DEFAULT_INDEX} 10"),
        ]
    );

    let stored = populator.sink().stored.lock().unwrap();
    assert_eq!(stored.len(), 10);
    assert_eq!(stored[0].timestamp, anchor() - Duration::hours(10));
    for pair in stored.windows(2) {
        assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(1));
        assert!(pair[1].used_pct() >= pair[0].used_pct());
    }
    assert!(stored.iter().all(|d| d.host.name == "synthetic-server-01"));
}

#[tokio::test]
async fn test_missing_index_is_not_deleted() {
    let populator = ElasticsearchPopulator::new(StubSink::default(), "storage-demo");

    ingest(&populator, small_generator(), anchor()).await.unwrap();

    let calls = populator.sink().calls.lock().unwrap();
    assert!(!calls.iter().any(|c| c.starts_with("delete")));
}

#[tokio::test]
async fn test_rejected_document_fails_the_run() {
    let sink = StubSink {
        reject_position: Some(3),
        ..Default::default()
    };
    let populator = ElasticsearchPopulator::new(sink, DEFAULT_INDEX).with_chunk_size(4);

    let err = ingest(&populator, small_generator(), anchor())
        .await
        .unwrap_err();

    match err.downcast_ref::<PopulatorError>() {
        Some(PopulatorError::PartialFailure { failed, first }) => {
            assert_eq!(*failed, 1);
            assert!(first.contains("document 3"), "{first}");
            assert!(first.contains("mapper_parsing_exception"), "{first}");
        }
        other => panic!("Expected PartialFailure, got {other:?}"),
    }

    // The rest of the series was still sent
    assert_eq!(populator.sink().stored.lock().unwrap().len(), 10);
}

#[tokio::test]
async fn test_connection_failure_leaves_index_untouched() {
    let sink = StubSink {
        index_exists: true,
        fail_info: true,
        ..Default::default()
    };
    let populator = ElasticsearchPopulator::new(sink, DEFAULT_INDEX);

    let err = ingest(&populator, small_generator(), anchor())
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PopulatorError>(),
        Some(PopulatorError::Connection(m)) if m.contains("401")
    ));
    assert_eq!(*populator.sink().calls.lock().unwrap(), vec!["info".to_string()]);
    assert!(populator.sink().stored.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_failure_aborts_before_bulk() {
    let sink = StubSink {
        index_exists: true,
        fail_delete: true,
        ..Default::default()
    };
    let populator = ElasticsearchPopulator::new(sink, DEFAULT_INDEX);

    let err = ingest(&populator, small_generator(), anchor())
        .await
        .unwrap_err();

    let message = format!("{err:#}");
    assert!(
        message.contains(&format!("Failed to recreate index '{DEFAULT_INDEX}'")),
        "{message}"
    );
    assert!(message.contains("returned status 403"), "{message}");

    let calls = populator.sink().calls.lock().unwrap();
    assert_eq!(calls.last(), Some(&format!("delete {DEFAULT_INDEX}")));
    assert!(!calls.iter().any(|c| c.starts_with("bulk")));
}

#[tokio::test]
async fn test_bulk_failure_aborts_the_run() {
    let sink = StubSink {
        fail_bulk: true,
        ..Default::default()
    };
    let populator = ElasticsearchPopulator::new(sink, DEFAULT_INDEX).with_chunk_size(4);

    let err = ingest(&populator, small_generator(), anchor())
        .await
        .unwrap_err();

    let message = format!("{err:#}");
    assert!(message.starts_with("Bulk write failed"), "{message}");
    assert!(message.contains("POST /_bulk returned status 503"), "{message}");

    // The first failing request stops the load
    let calls = populator.sink().calls.lock().unwrap();
    let bulk_calls: Vec<_> = calls.iter().filter(|c| c.starts_with("bulk")).collect();
    assert_eq!(bulk_calls, vec![&format!("bulk {DEFAULT_INDEX} 4")]);
}

#[tokio::test]
async fn test_missing_credentials_abort_before_generation() {
    let opts = PopulateOpts {
        elastic: ElasticsearchPopulateArgs {
            elastic_host: Some("https://localhost:9200".to_string()),
            elastic_api_key: None,
            elastic_index: DEFAULT_INDEX.to_string(),
        },
        seed: Some(42),
        request_timeout: None,
        dry_run: false,
    };

    let err = run_populate(opts).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PopulatorError>(),
        Some(PopulatorError::MissingConfig(_))
    ));
}

#[tokio::test]
async fn test_dry_run_does_not_connect() {
    // Port 9 is never an Elasticsearch node; dry-run must not touch it.
    let opts = PopulateOpts {
        elastic: ElasticsearchPopulateArgs {
            elastic_host: Some("http://127.0.0.1:9".to_string()),
            elastic_api_key: Some("abc".to_string()),
            elastic_index: DEFAULT_INDEX.to_string(),
        },
        seed: Some(42),
        request_timeout: Some(std::time::Duration::from_secs(1)),
        dry_run: true,
    };

    run_populate(opts).await.unwrap();
}
