use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata stamped on every stock manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Human-readable name of the exported stock.
    pub name: String,
    /// When the export was produced.
    pub exported: DateTime<Utc>,
    /// Tool that produced the export.
    pub generator: String,
}

impl ExportMetadata {
    /// Metadata with the given name and the current timestamp.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exported: Utc::now(),
            generator: concat!("lathe-stock-export ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
