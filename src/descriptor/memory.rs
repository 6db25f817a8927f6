//! In-memory descriptor used by tests and examples

use super::types::{FunctionConfig, LayerlineSettings};
use super::DeploymentDescriptor;

/// A descriptor held entirely in memory.
///
/// Functions keep their insertion order, mirroring the declaration order a
/// file-backed descriptor would report.
#[derive(Debug, Clone, Default)]
pub struct MemoryDescriptor {
    region: Option<String>,
    default_layers: Option<Vec<String>>,
    settings: LayerlineSettings,
    functions: Vec<(String, FunctionConfig)>,
}

impl MemoryDescriptor {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            ..Default::default()
        }
    }

    pub fn with_function(mut self, name: impl Into<String>, config: FunctionConfig) -> Self {
        self.functions.push((name.into(), config));
        self
    }

    pub fn with_default_layers(mut self, layers: Vec<String>) -> Self {
        self.default_layers = Some(layers);
        self
    }

    pub fn with_settings(mut self, settings: LayerlineSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl DeploymentDescriptor for MemoryDescriptor {
    fn function_names(&self) -> Vec<String> {
        self.functions.iter().map(|(name, _)| name.clone()).collect()
    }

    fn function(&self, name: &str) -> Option<FunctionConfig> {
        self.functions
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, config)| config.clone())
    }

    fn set_function(&mut self, name: &str, config: FunctionConfig) {
        match self.functions.iter_mut().find(|(candidate, _)| candidate == name) {
            Some((_, existing)) => *existing = config,
            None => self.functions.push((name.to_string(), config)),
        }
    }

    fn default_layers(&self) -> Option<Vec<String>> {
        self.default_layers.clone()
    }

    fn region(&self) -> Option<String> {
        self.region.clone()
    }

    fn settings(&self) -> LayerlineSettings {
        self.settings.clone()
    }
}
