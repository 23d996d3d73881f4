//! Generated data points and their document form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single disk-usage sample.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    /// Index within the series.
    pub index: u32,
    pub timestamp: DateTime<Utc>,
    /// Used fraction in `[0.0, 1.0]`, rounded to 4 decimals.
    pub value: f64,
    pub host_name: String,
}

impl DataPoint {
    /// Convert to the document shape stored in the index.
    pub fn to_document(&self) -> StorageDocument {
        StorageDocument {
            timestamp: self.timestamp,
            host: Host {
                name: self.host_name.clone(),
            },
            system: System {
                filesystem: Filesystem {
                    used: Used { pct: self.value },
                },
            },
        }
    }
}

/// Document written for each point.
///
/// ```json
/// {
///   "@timestamp": "2024-06-01T12:00:00Z",
///   "host": { "name": "synthetic-server-01" },
///   "system": { "filesystem": { "used": { "pct": 0.3012 } } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageDocument {
    #[serde(rename = "@timestamp")]
    pub timestamp: DateTime<Utc>,
    pub host: Host,
    pub system: System,
}

impl StorageDocument {
    /// The `system.filesystem.used.pct` field.
    pub fn used_pct(&self) -> f64 {
        self.system.filesystem.used.pct
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    pub filesystem: Filesystem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filesystem {
    pub used: Used,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Used {
    pub pct: f64,
}
