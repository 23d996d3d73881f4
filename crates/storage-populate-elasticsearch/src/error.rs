//! Error types for the Elasticsearch populator.

use thiserror::Error;

/// Errors that can occur during Elasticsearch population.
#[derive(Error, Debug)]
pub enum PopulatorError {
    /// A required connection parameter is absent.
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// A connection parameter is present but unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The initial connectivity check failed.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Transport-level HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{method} {path} returned status {status}: {body}")]
    Status {
        method: &'static str,
        path: String,
        status: u16,
        body: String,
    },

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The bulk response does not line up with the request.
    #[error("Unexpected bulk response: {0}")]
    UnexpectedResponse(String),

    /// Some documents were rejected by the server.
    #[error("{failed} document(s) failed to index; first failure: {first}")]
    PartialFailure { failed: usize, first: String },
}
