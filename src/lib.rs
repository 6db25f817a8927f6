//! layerline - observability instrumentation for serverless deployments
//!
//! This library augments a serverless deployment descriptor by attaching
//! runtime-support layers (a tracing library and an out-of-process extension)
//! to each function definition, selected by region, runtime, and CPU
//! architecture. It also reconciles the monitor definitions declared in the
//! descriptor against a remote monitoring account.
//!
//! # Core Concepts
//!
//! - **Discovery**: enumerating and classifying every function in the
//!   descriptor, excluding opted-out names
//! - **Resolution**: picking the layer ARNs that apply to a function from a
//!   region-keyed catalog, preferring architecture-specific variants
//! - **Merge**: folding resolved ARNs into each function's layer list,
//!   order-preserving, de-duplicated, idempotent
//! - **Monitor sync**: creating, updating, and deleting remote monitors so
//!   they match the declared set, keyed by a stable tag
//!
//! # Example Usage
//!
//! ```
//! use layerline::{
//!     apply_extension_layer, apply_library_layers, find_handlers, LayerCatalog,
//! };
//! use layerline::descriptor::{FunctionConfig, MemoryDescriptor};
//! use std::collections::HashSet;
//!
//! let descriptor = MemoryDescriptor::new("us-east-1")
//!     .with_function("hello", FunctionConfig::with_runtime("nodejs10.x"));
//! let catalog = LayerCatalog::from_json(
//!     r#"{ "regions": { "us-east-1": { "nodejs10.x": "node:2", "extension": "extension:5" } } }"#,
//! )
//! .unwrap();
//!
//! let mut handlers = find_handlers(&descriptor, &HashSet::new());
//! apply_library_layers("us-east-1", &mut handlers, &catalog, None);
//! apply_extension_layer("us-east-1", &mut handlers, &catalog, None);
//!
//! assert_eq!(
//!     handlers[0].config.layers,
//!     Some(vec!["node:2".to_string(), "extension:5".to_string()])
//! );
//! ```
//!
//! # Project Structure
//!
//! - [`layers`]: runtime classification, catalog, resolution, merge
//! - [`descriptor`]: the deployment-descriptor collaborator
//! - [`monitors`]: remote monitor client and reconciliation
//! - [`stack`]: the stack-identity collaborator

// Public modules
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod layers;
pub mod monitors;
pub mod stack;
pub mod util;

// Re-export key types for convenient access
pub use config::{ConfigError, LayerlineConfig};
pub use descriptor::{DeploymentDescriptor, DescriptorError, FunctionConfig, YamlDescriptor};
pub use layers::{
    apply_extension_layer, apply_library_layers, find_handlers, push_layer_arn,
    resolve_extension_layer, resolve_library_layer, FunctionInfo, LayerCatalog, RuntimeType,
};
pub use monitors::{
    sync_monitors, HttpMonitorsClient, MonitorSpec, MonitorsApi, MonitorsError, SyncAction,
    SyncOutcome,
};
pub use stack::{FixedStackId, StackIdSource};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
