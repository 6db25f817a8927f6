//! Layer ARN resolution
//!
//! Picks the ARN that applies to one function out of a region's catalog
//! entry. Architecture-specific variants win when the function targets ARM
//! and the variant exists; otherwise resolution falls back to the default
//! key, because some runtime/region combinations only ship an x86 artifact.
//! Resolution is total: missing regions, runtimes, or keys resolve to `None`,
//! never to an error.

use crate::layers::catalog::LayerCatalog;
use crate::layers::discovery::FunctionInfo;

/// Architecture value that selects `-arm` catalog variants
pub const ARM64_ARCHITECTURE: &str = "arm64";

/// Catalog key for the extension layer
pub const EXTENSION_KEY: &str = "extension";

/// Suffix of architecture-qualified catalog keys
const ARM_KEY_SUFFIX: &str = "-arm";

fn targets_arm(info: &FunctionInfo) -> bool {
    info.architecture.as_deref() == Some(ARM64_ARCHITECTURE)
}

/// Looks up `base_key`, preferring the `-arm` variant when asked to.
fn resolve_key<'a>(
    entry: &'a std::collections::HashMap<String, String>,
    base_key: &str,
    prefer_arm: bool,
) -> Option<&'a str> {
    if prefer_arm {
        let arm_key = format!("{base_key}{ARM_KEY_SUFFIX}");
        if let Some(arn) = entry.get(&arm_key) {
            return Some(arn.as_str());
        }
    }
    entry.get(base_key).map(String::as_str)
}

/// Resolves the runtime library layer for one function, if any applies.
pub fn resolve_library_layer<'a>(
    region: &str,
    info: &FunctionInfo,
    catalog: &'a LayerCatalog,
) -> Option<&'a str> {
    if !info.runtime_type.is_supported() || info.runtime.is_empty() {
        return None;
    }
    let entry = catalog.region(region)?;
    resolve_key(entry, &info.runtime, targets_arm(info))
}

/// Resolves the extension layer for one function, if any applies.
///
/// Independent of [`resolve_library_layer`]: the availability of one never
/// implies the availability of the other.
pub fn resolve_extension_layer<'a>(
    region: &str,
    info: &FunctionInfo,
    catalog: &'a LayerCatalog,
) -> Option<&'a str> {
    if !info.runtime_type.is_supported() || info.runtime.is_empty() {
        return None;
    }
    let entry = catalog.region(region)?;
    resolve_key(entry, EXTENSION_KEY, targets_arm(info))
}
