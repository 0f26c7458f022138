use lathe_types::StagedObject;
use serde::Serialize;
use tracing::info;

use crate::errors::ExportError;
use crate::metadata::ExportMetadata;

/// Format identifier written into every manifest.
pub const MANIFEST_FORMAT: &str = "lathe-stock";

/// Current manifest version.
pub const MANIFEST_VERSION: u32 = 1;

/// Top-level manifest structure. Write-only: nothing reads it back.
#[derive(Debug, Clone, Serialize)]
pub struct StockManifest<'a> {
    /// Format identifier.
    pub format: &'static str,
    /// Format version number.
    pub version: u32,
    pub metadata: &'a ExportMetadata,
    /// Blueprints in stock order, ghosts included with their status.
    pub objects: &'a [StagedObject],
}

/// Serialize the stock to a pretty-printed JSON manifest.
pub fn stock_manifest(
    objects: &[StagedObject],
    metadata: &ExportMetadata,
) -> Result<String, ExportError> {
    let manifest = StockManifest {
        format: MANIFEST_FORMAT,
        version: MANIFEST_VERSION,
        metadata,
        objects,
    };
    let json = serde_json::to_string_pretty(&manifest).map_err(|e| ExportError::Serialization {
        reason: e.to_string(),
    })?;
    info!(objects = objects.len(), bytes = json.len(), "stock manifest written");
    Ok(json)
}
