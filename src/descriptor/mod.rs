//! Deployment descriptor collaborator
//!
//! The descriptor is treated as a key-value store of function entries plus a
//! handful of deployment-wide fields. [`DeploymentDescriptor`] is the seam:
//! the layer engine only enumerates names, reads configs, and writes configs
//! back. [`YamlDescriptor`] backs the trait with a serverless.yml file;
//! [`MemoryDescriptor`] is an in-memory implementation for tests.

pub mod memory;
pub mod types;
pub mod yaml;

pub use memory::MemoryDescriptor;
pub use types::{FunctionConfig, LayerlineSettings};
pub use yaml::{DescriptorError, YamlDescriptor};

/// Read/write access to a deployment descriptor.
///
/// Function entries are addressed by name; enumeration order follows the
/// descriptor's declaration order. Parsing and persisting the descriptor
/// itself is the implementation's concern.
pub trait DeploymentDescriptor {
    /// Function names in declaration order
    fn function_names(&self) -> Vec<String>;

    /// The entry for one function, `None` if absent or unreadable
    fn function(&self, name: &str) -> Option<FunctionConfig>;

    /// Replaces the entry for one function
    fn set_function(&mut self, name: &str, config: FunctionConfig);

    /// Deployment-wide default layer list, if declared
    fn default_layers(&self) -> Option<Vec<String>>;

    /// Deployment region, if declared
    fn region(&self) -> Option<String>;

    /// The `custom.layerline` settings block, defaults when absent
    fn settings(&self) -> LayerlineSettings;
}
