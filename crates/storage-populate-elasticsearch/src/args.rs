//! CLI argument definitions for the Elasticsearch populator.

use crate::error::PopulatorError;
use clap::Args;

/// Index written when none is configured.
pub const DEFAULT_INDEX: &str = "synthetic-storage-history";

/// Elasticsearch connection arguments.
///
/// Endpoint and API key are optional at the clap level so that a missing
/// value surfaces as `PopulatorError::MissingConfig` instead of a usage error.
#[derive(Args, Clone, Debug)]
pub struct ElasticsearchPopulateArgs {
    /// Elasticsearch endpoint URL (e.g., https://localhost:9200)
    #[arg(long, env = "ELASTIC_HOST")]
    pub elastic_host: Option<String>,

    /// Elasticsearch API key (base64 encoded "id:key")
    #[arg(long, env = "ELASTIC_API_KEY", hide_env_values = true)]
    pub elastic_api_key: Option<String>,

    /// Target index; deleted and recreated on every run
    #[arg(long, env = "ELASTIC_INDEX", default_value = DEFAULT_INDEX)]
    pub elastic_index: String,
}

/// Resolved connection settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub endpoint: String,
    pub api_key: String,
    pub index: String,
}

impl ElasticsearchPopulateArgs {
    /// Resolve the connection settings, treating empty values as absent.
    pub fn connection(&self) -> Result<ConnectionConfig, PopulatorError> {
        let endpoint = non_empty(&self.elastic_host).ok_or_else(|| missing("ELASTIC_HOST"))?;
        let api_key = non_empty(&self.elastic_api_key).ok_or_else(|| missing("ELASTIC_API_KEY"))?;

        let index = self.elastic_index.trim();
        if index.is_empty() {
            return Err(PopulatorError::MissingConfig(
                "ELASTIC_INDEX is empty".to_string(),
            ));
        }

        Ok(ConnectionConfig {
            endpoint,
            api_key,
            index: index.to_string(),
        })
    }
}

fn missing(var: &str) -> PopulatorError {
    PopulatorError::MissingConfig(format!("{var} is not set (check the environment or .env)"))
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
