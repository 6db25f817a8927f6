//! serverless.yml-backed descriptor
//!
//! Keeps the whole document as a raw YAML mapping so that everything
//! layerline does not model (resources, plugins, events, ...) survives a
//! load/mutate/save cycle byte-for-meaning. Function entries are converted
//! to [`FunctionConfig`] on access and serialized back on write; the mapping
//! preserves declaration order, which later stages rely on for deterministic
//! output.

use super::types::{FunctionConfig, LayerlineSettings};
use super::DeploymentDescriptor;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Errors raised while loading or persisting a descriptor file
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// Descriptor file could not be read or written
    #[error("Failed to access descriptor {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Descriptor content is not valid YAML
    #[error("Failed to parse descriptor: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Document root is not a mapping
    #[error("Descriptor root must be a mapping")]
    NotAMapping,
}

/// A deployment descriptor backed by a YAML document
#[derive(Debug, Clone)]
pub struct YamlDescriptor {
    doc: Mapping,
    path: Option<PathBuf>,
}

impl YamlDescriptor {
    /// Parses a descriptor from YAML text.
    pub fn from_str(content: &str) -> Result<Self, DescriptorError> {
        let value: Value = serde_yaml::from_str(content)?;
        match value {
            Value::Mapping(doc) => Ok(Self { doc, path: None }),
            _ => Err(DescriptorError::NotAMapping),
        }
    }

    /// Loads a descriptor from a file, remembering the path for [`Self::save`].
    pub fn load(path: &Path) -> Result<Self, DescriptorError> {
        let content = fs::read_to_string(path).map_err(|source| DescriptorError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut descriptor = Self::from_str(&content)?;
        descriptor.path = Some(path.to_path_buf());
        Ok(descriptor)
    }

    /// Serializes the document back to YAML text.
    pub fn to_yaml_string(&self) -> Result<String, DescriptorError> {
        Ok(serde_yaml::to_string(&self.doc)?)
    }

    /// Writes the document back to the path it was loaded from.
    pub fn save(&self) -> Result<(), DescriptorError> {
        let path = self.path.clone().unwrap_or_else(|| PathBuf::from("serverless.yml"));
        self.save_to(&path)
    }

    /// Writes the document to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), DescriptorError> {
        let content = self.to_yaml_string()?;
        fs::write(path, content).map_err(|source| DescriptorError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Declared service name, if any
    pub fn service(&self) -> Option<String> {
        match self.doc.get(&Value::from("service"))? {
            Value::String(name) => Some(name.clone()),
            // `service:` may also be a mapping with a `name` key
            Value::Mapping(map) => match map.get(&Value::from("name"))? {
                Value::String(name) => Some(name.clone()),
                _ => None,
            },
            _ => None,
        }
    }

    fn provider(&self) -> Option<&Mapping> {
        self.doc.get(&Value::from("provider"))?.as_mapping()
    }

    fn functions(&self) -> Option<&Mapping> {
        self.doc.get(&Value::from("functions"))?.as_mapping()
    }
}

impl DeploymentDescriptor for YamlDescriptor {
    fn function_names(&self) -> Vec<String> {
        let Some(functions) = self.functions() else {
            return Vec::new();
        };
        functions
            .keys()
            .filter_map(|key| key.as_str().map(str::to_string))
            .collect()
    }

    fn function(&self, name: &str) -> Option<FunctionConfig> {
        let entry = self.functions()?.get(&Value::from(name))?.clone();
        match serde_yaml::from_value(entry) {
            Ok(config) => Some(config),
            Err(error) => {
                warn!(function = name, %error, "Skipping unreadable function entry");
                None
            }
        }
    }

    fn set_function(&mut self, name: &str, config: FunctionConfig) {
        let value = match serde_yaml::to_value(&config) {
            Ok(value) => value,
            Err(error) => {
                warn!(function = name, %error, "Failed to serialize function entry");
                return;
            }
        };

        let functions = self
            .doc
            .entry(Value::from("functions"))
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        if let Value::Mapping(map) = functions {
            // Replacing an existing key keeps its position in the mapping
            map.insert(Value::from(name), value);
        }
    }

    fn default_layers(&self) -> Option<Vec<String>> {
        let layers = self.provider()?.get(&Value::from("layers"))?.clone();
        serde_yaml::from_value(layers).ok()
    }

    fn region(&self) -> Option<String> {
        match self.provider()?.get(&Value::from("region"))? {
            Value::String(region) => Some(region.clone()),
            _ => None,
        }
    }

    fn settings(&self) -> LayerlineSettings {
        let block = self
            .doc
            .get(&Value::from("custom"))
            .and_then(|custom| custom.as_mapping())
            .and_then(|custom| custom.get(&Value::from("layerline")))
            .cloned();

        match block {
            Some(value) => serde_yaml::from_value(value).unwrap_or_else(|error| {
                warn!(%error, "Invalid custom.layerline block, using defaults");
                LayerlineSettings::default()
            }),
            None => LayerlineSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: &str = r#"
service: shop-backend
provider:
  name: aws
  region: eu-west-1
  layers:
    - arn:aws:lambda:eu-west-1:123456789012:layer:shared:1
functions:
  checkout:
    handler: src/checkout.handler
    runtime: nodejs18.x
  reports:
    handler: src/reports.main
    runtime: python3.9
    architecture: arm64
    layers: []
  legacy:
    image: registry/acme/legacy:latest
custom:
  layerline:
    exclude:
      - legacy
"#;

    #[test]
    fn test_function_names_in_declaration_order() {
        let descriptor = YamlDescriptor::from_str(DESCRIPTOR).unwrap();
        assert_eq!(descriptor.function_names(), vec!["checkout", "reports", "legacy"]);
    }

    #[test]
    fn test_reads_provider_fields() {
        let descriptor = YamlDescriptor::from_str(DESCRIPTOR).unwrap();
        assert_eq!(descriptor.region().as_deref(), Some("eu-west-1"));
        assert_eq!(
            descriptor.default_layers().unwrap(),
            vec!["arn:aws:lambda:eu-west-1:123456789012:layer:shared:1".to_string()]
        );
        assert_eq!(descriptor.service().as_deref(), Some("shop-backend"));
    }

    #[test]
    fn test_function_entries() {
        let descriptor = YamlDescriptor::from_str(DESCRIPTOR).unwrap();

        let checkout = descriptor.function("checkout").unwrap();
        assert_eq!(checkout.runtime.as_deref(), Some("nodejs18.x"));
        assert!(checkout.layers.is_none());

        let reports = descriptor.function("reports").unwrap();
        assert_eq!(reports.architecture.as_deref(), Some("arm64"));
        assert_eq!(reports.layers, Some(Vec::new()));

        let legacy = descriptor.function("legacy").unwrap();
        assert!(legacy.runtime.is_none());
        assert!(legacy.image.is_some());

        assert!(descriptor.function("missing").is_none());
    }

    #[test]
    fn test_set_function_preserves_other_keys_and_order() {
        let mut descriptor = YamlDescriptor::from_str(DESCRIPTOR).unwrap();
        let mut checkout = descriptor.function("checkout").unwrap();
        checkout.layers = Some(vec!["node:2".to_string()]);
        descriptor.set_function("checkout", checkout);

        assert_eq!(descriptor.function_names(), vec!["checkout", "reports", "legacy"]);
        let reread = descriptor.function("checkout").unwrap();
        assert_eq!(reread.layers, Some(vec!["node:2".to_string()]));
        // the handler key survived the round trip
        assert_eq!(reread.extra.len(), 1);
    }

    #[test]
    fn test_settings_block() {
        let descriptor = YamlDescriptor::from_str(DESCRIPTOR).unwrap();
        let settings = descriptor.settings();
        assert!(settings.enabled);
        assert_eq!(settings.exclude, vec!["legacy".to_string()]);

        let bare = YamlDescriptor::from_str("service: bare\n").unwrap();
        assert_eq!(bare.settings(), LayerlineSettings::default());
        assert!(bare.function_names().is_empty());
        assert!(bare.region().is_none());
    }

    #[test]
    fn test_rejects_non_mapping_root() {
        assert!(matches!(
            YamlDescriptor::from_str("- just\n- a list\n"),
            Err(DescriptorError::NotAMapping)
        ));
    }
}
