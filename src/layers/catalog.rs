//! Layer catalog loading and lookup
//!
//! The catalog is a nested mapping from region to per-region layer keys:
//!
//! ```json
//! {
//!   "regions": {
//!     "us-east-1": {
//!       "nodejs18.x": "arn:aws:lambda:us-east-1:...:layer:Datadog-Node18-x:107",
//!       "python3.9": "arn:aws:lambda:us-east-1:...:layer:Datadog-Python39:78",
//!       "python3.9-arm": "arn:aws:lambda:us-east-1:...:layer:Datadog-Python39-ARM:78",
//!       "extension": "arn:aws:lambda:us-east-1:...:layer:Datadog-Extension:45",
//!       "extension-arm": "arn:aws:lambda:us-east-1:...:layer:Datadog-Extension-ARM:45"
//!     }
//!   }
//! }
//! ```
//!
//! Keys are either a bare runtime identifier, an architecture-qualified
//! `<runtime>-arm` variant, or the literal `extension` / `extension-arm`
//! entries. The catalog is treated as read-only input; a snapshot is embedded
//! in the binary and an external file can be supplied instead.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Catalog snapshot committed with the crate
const BUILTIN_CATALOG: &str = include_str!("../../assets/layers.json");

/// Errors raised while loading an external catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read layer catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Catalog content is not valid JSON of the expected shape
    #[error("Failed to parse layer catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Mapping of region to available layer ARNs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerCatalog {
    /// region -> (runtime-or-architecture key -> ARN)
    #[serde(default)]
    pub regions: HashMap<String, HashMap<String, String>>,
}

impl LayerCatalog {
    /// Returns the catalog snapshot embedded in the binary.
    pub fn builtin() -> Self {
        serde_json::from_str(BUILTIN_CATALOG).expect("embedded layer catalog is valid JSON")
    }

    /// Parses a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a catalog from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Looks up the layer entries published for a region.
    pub fn region(&self, region: &str) -> Option<&HashMap<String, String>> {
        self.regions.get(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_regions() {
        let catalog = LayerCatalog::from_json(
            r#"{ "regions": { "us-east-1": { "nodejs10.x": "node:2", "extension": "extension:5" } } }"#,
        )
        .unwrap();

        let entry = catalog.region("us-east-1").unwrap();
        assert_eq!(entry.get("nodejs10.x").unwrap(), "node:2");
        assert_eq!(entry.get("extension").unwrap(), "extension:5");
        assert!(catalog.region("us-east-2").is_none());
    }

    #[test]
    fn test_empty_document_yields_empty_catalog() {
        let catalog = LayerCatalog::from_json("{}").unwrap();
        assert!(catalog.regions.is_empty());
    }

    #[test]
    fn test_builtin_snapshot_loads() {
        let catalog = LayerCatalog::builtin();
        assert!(!catalog.regions.is_empty());
        let entry = catalog.region("us-east-1").unwrap();
        assert!(entry.contains_key("extension"));
        assert!(entry.contains_key("extension-arm"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(LayerCatalog::from_json("{ regions:").is_err());
    }
}
