//! Layer instrumentation core
//!
//! Discovery enumerates and classifies the functions of a deployment,
//! resolution picks the ARNs that apply per region and architecture, and the
//! merge engine folds them into each function's layer list. All of it is
//! pure in-memory work over the descriptor's entries.

pub mod catalog;
pub mod discovery;
pub mod merge;
pub mod resolve;
pub mod runtime;

pub use catalog::{CatalogError, LayerCatalog};
pub use discovery::{find_handlers, FunctionInfo};
pub use merge::{apply_extension_layer, apply_library_layers, push_layer_arn};
pub use resolve::{resolve_extension_layer, resolve_library_layer, ARM64_ARCHITECTURE, EXTENSION_KEY};
pub use runtime::RuntimeType;
