//! Typed views of descriptor entries
//!
//! Function entries in a deployment descriptor are heterogeneous: runtime,
//! architecture, and layers may each be present or absent, and the entry
//! carries arbitrary other keys (handler, events, environment, ...) that
//! layerline must pass through untouched. Every field layerline cares about
//! is an explicit `Option`; everything else is preserved in `extra`.

use crate::monitors::types::MonitorSpec;
use serde::{Deserialize, Serialize};

/// One function entry from the deployment descriptor.
///
/// Only the fields relevant to layer instrumentation are modeled; all other
/// keys round-trip through [`FunctionConfig::extra`] so writing a config back
/// never loses configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionConfig {
    /// Declared runtime identifier, absent for container-image functions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,

    /// CPU architecture; absent means the platform default (x86)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,

    /// Ordered list of layer ARNs attached to the function.
    ///
    /// `None` means the function declares no list of its own and may be
    /// seeded from the deployment-wide defaults; `Some(vec![])` is an
    /// explicit empty list and is never re-seeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<Vec<String>>,

    /// Container image reference, mutually exclusive with `runtime`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<serde_yaml::Value>,

    /// All remaining descriptor keys, passed through verbatim
    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

impl FunctionConfig {
    /// Creates a config with just a runtime identifier (test convenience).
    pub fn with_runtime(runtime: impl Into<String>) -> Self {
        Self {
            runtime: Some(runtime.into()),
            ..Default::default()
        }
    }

    /// Whether the function declares its own layer list, even an empty one
    pub fn has_own_layers(&self) -> bool {
        self.layers.is_some()
    }
}

/// Instrumentation settings read from the descriptor's `custom.layerline`
/// block. Missing fields take their defaults; a missing block means
/// everything is enabled with no exclusions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayerlineSettings {
    /// Master switch for the whole plugin
    pub enabled: bool,

    /// Attach the runtime library layer
    pub add_layers: bool,

    /// Attach the extension layer
    pub add_extension: bool,

    /// Function names to leave untouched
    pub exclude: Vec<String>,

    /// Desired monitor definitions to reconcile remotely
    pub monitors: Vec<MonitorSpec>,
}

impl Default for LayerlineSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            add_layers: true,
            add_extension: true,
            exclude: Vec::new(),
            monitors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_config_roundtrip_preserves_unknown_keys() {
        let yaml = "handler: src/index.handler\nruntime: nodejs18.x\nmemorySize: 512\n";
        let config: FunctionConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.runtime.as_deref(), Some("nodejs18.x"));
        assert!(config.layers.is_none());
        assert_eq!(config.extra.len(), 2);

        let back = serde_yaml::to_string(&config).unwrap();
        let reparsed: FunctionConfig = serde_yaml::from_str(&back).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_explicit_empty_layers_is_distinct_from_absent() {
        let with_empty: FunctionConfig = serde_yaml::from_str("runtime: python3.9\nlayers: []\n").unwrap();
        let without: FunctionConfig = serde_yaml::from_str("runtime: python3.9\n").unwrap();

        assert!(with_empty.has_own_layers());
        assert!(!without.has_own_layers());
    }

    #[test]
    fn test_settings_defaults() {
        let settings = LayerlineSettings::default();
        assert!(settings.enabled);
        assert!(settings.add_layers);
        assert!(settings.add_extension);
        assert!(settings.exclude.is_empty());

        let partial: LayerlineSettings =
            serde_yaml::from_str("addExtension: false\nexclude: [skip-me]\n").unwrap();
        assert!(partial.enabled);
        assert!(partial.add_layers);
        assert!(!partial.add_extension);
        assert_eq!(partial.exclude, vec!["skip-me".to_string()]);
    }
}
