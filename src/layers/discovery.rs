//! Handler discovery
//!
//! Walks the deployment descriptor, classifies every function, and produces
//! the working records the resolver and merge engine operate on. Functions in
//! the exclusion set are dropped here; unsupported runtimes (including
//! container-image functions) are kept so later stages skip them uniformly
//! instead of special-casing them.

use crate::descriptor::{DeploymentDescriptor, FunctionConfig};
use crate::layers::runtime::RuntimeType;
use std::collections::HashSet;
use tracing::debug;

/// One function selected for instrumentation.
///
/// `config` is the function's descriptor entry, mutated in place by the merge
/// engine; the caller writes it back to the descriptor once all merges ran.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionInfo {
    /// Function name as declared in the descriptor
    pub name: String,
    /// Declared runtime identifier, empty when absent
    pub runtime: String,
    /// Coarse runtime family derived from `runtime`
    pub runtime_type: RuntimeType,
    /// CPU architecture, `None` for the x86 default
    pub architecture: Option<String>,
    /// The function's descriptor entry
    pub config: FunctionConfig,
}

/// Enumerates all functions in the descriptor, in declaration order,
/// skipping names present in `excluded`.
pub fn find_handlers(
    descriptor: &dyn DeploymentDescriptor,
    excluded: &HashSet<String>,
) -> Vec<FunctionInfo> {
    let mut handlers = Vec::new();

    for name in descriptor.function_names() {
        if excluded.contains(&name) {
            debug!(function = %name, "Excluded from instrumentation");
            continue;
        }

        let Some(config) = descriptor.function(&name) else {
            continue;
        };

        let runtime = config.runtime.clone().unwrap_or_default();
        let runtime_type = RuntimeType::classify(&runtime);
        let architecture = config.architecture.clone();

        handlers.push(FunctionInfo {
            name,
            runtime,
            runtime_type,
            architecture,
            config,
        });
    }

    handlers
}
