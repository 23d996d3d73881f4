//! Populate command handler.
//!
//! Generates the synthetic storage series and bulk-loads it into Elasticsearch.

mod logging;
mod run;

pub use logging::{mask_api_key, mask_url_credentials};
pub use run::{ingest, run_populate, PopulateOpts};
