//! Layer merge engine
//!
//! Merges resolved ARNs into each function's layer list. The merge is
//! idempotent: an ARN already present is never appended again, and running
//! the same merge twice leaves the list unchanged. A function with no list of
//! its own is seeded from a copy of the deployment-wide defaults; a function
//! with an explicit list, even an empty one, keeps it.

use crate::layers::catalog::LayerCatalog;
use crate::layers::discovery::FunctionInfo;
use crate::layers::resolve::{resolve_extension_layer, resolve_library_layer};
use tracing::debug;

/// Appends each ARN to `current` unless it is already present.
///
/// Relative order of first-seen ARNs is preserved; comparison is exact
/// string match.
pub fn push_layer_arn(arns: &[&str], mut current: Vec<String>) -> Vec<String> {
    for arn in arns {
        if !current.iter().any(|existing| existing == arn) {
            current.push((*arn).to_string());
        }
    }
    current
}

fn merge_into(info: &mut FunctionInfo, arn: &str, default_layers: Option<&[String]>) {
    // Explicit lists (even empty) win over the deployment-wide defaults
    let current = match info.config.layers.take() {
        Some(own) => own,
        None => default_layers.map(|defaults| defaults.to_vec()).unwrap_or_default(),
    };
    info.config.layers = Some(push_layer_arn(&[arn], current));
}

/// Attaches the runtime library layer to every function it resolves for.
///
/// Functions without a resolved ARN are left untouched; in particular no
/// empty layer list is created for them.
pub fn apply_library_layers(
    region: &str,
    handlers: &mut [FunctionInfo],
    catalog: &LayerCatalog,
    default_layers: Option<&[String]>,
) {
    for info in handlers.iter_mut() {
        let Some(arn) = resolve_library_layer(region, info, catalog) else {
            continue;
        };
        let arn = arn.to_string();
        debug!(function = %info.name, layer = %arn, "Attaching library layer");
        merge_into(info, &arn, default_layers);
    }
}

/// Attaches the extension layer to every function it resolves for.
///
/// Independent of [`apply_library_layers`]; when both apply, call this one
/// second so the library ARN precedes the extension ARN.
pub fn apply_extension_layer(
    region: &str,
    handlers: &mut [FunctionInfo],
    catalog: &LayerCatalog,
    default_layers: Option<&[String]>,
) {
    for info in handlers.iter_mut() {
        let Some(arn) = resolve_extension_layer(region, info, catalog) else {
            continue;
        };
        let arn = arn.to_string();
        debug!(function = %info.name, layer = %arn, "Attaching extension layer");
        merge_into(info, &arn, default_layers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::FunctionConfig;
    use crate::layers::runtime::RuntimeType;

    fn handler(runtime: &str, layers: Option<Vec<&str>>) -> FunctionInfo {
        FunctionInfo {
            name: "fn".to_string(),
            runtime: runtime.to_string(),
            runtime_type: RuntimeType::classify(runtime),
            architecture: None,
            config: FunctionConfig {
                runtime: Some(runtime.to_string()),
                layers: layers.map(|list| list.into_iter().map(str::to_string).collect()),
                ..Default::default()
            },
        }
    }

    fn catalog(json: &str) -> LayerCatalog {
        LayerCatalog::from_json(json).unwrap()
    }

    #[test]
    fn test_adds_layer_list_when_none_present() {
        let catalog = catalog(r#"{ "regions": { "us-east-1": { "nodejs10.x": "node:2" } } }"#);
        let mut handlers = vec![handler("nodejs10.x", None)];

        apply_library_layers("us-east-1", &mut handlers, &catalog, None);
        assert_eq!(handlers[0].config.layers, Some(vec!["node:2".to_string()]));
    }

    #[test]
    fn test_appends_after_existing_layers() {
        let catalog = catalog(r#"{ "regions": { "us-east-1": { "nodejs10.x": "node:2" } } }"#);
        let mut handlers = vec![handler("nodejs10.x", Some(vec!["node:1"]))];

        apply_library_layers("us-east-1", &mut handlers, &catalog, None);
        assert_eq!(
            handlers[0].config.layers,
            Some(vec!["node:1".to_string(), "node:2".to_string()])
        );
    }

    #[test]
    fn test_merge_is_idempotent() {
        let catalog = catalog(r#"{ "regions": { "us-east-1": { "nodejs10.x": "node:1" } } }"#);
        let mut handlers = vec![handler("nodejs10.x", Some(vec!["node:1"]))];

        apply_library_layers("us-east-1", &mut handlers, &catalog, None);
        apply_library_layers("us-east-1", &mut handlers, &catalog, None);
        assert_eq!(handlers[0].config.layers, Some(vec!["node:1".to_string()]));
    }

    #[test]
    fn test_untouched_when_region_unknown() {
        let catalog = catalog(r#"{ "regions": { "us-east-1": { "nodejs10.x": "node:1" } } }"#);
        let mut handlers = vec![handler("nodejs10.x", None)];

        apply_library_layers("us-east-2", &mut handlers, &catalog, None);
        assert_eq!(handlers[0].config.layers, None);
    }

    #[test]
    fn test_untouched_when_runtime_unsupported() {
        let catalog = catalog(r#"{ "regions": { "us-east-1": { "python2.7": "python:2" } } }"#);
        let mut handlers = vec![handler("go1.10", None)];

        apply_library_layers("us-east-1", &mut handlers, &catalog, None);
        assert_eq!(handlers[0].config.layers, None);
    }

    #[test]
    fn test_seeds_from_deployment_defaults_without_mutating_them() {
        let catalog = catalog(r#"{ "regions": { "us-east-1": { "nodejs10.x": "node:2" } } }"#);
        let defaults = vec!["default:1".to_string(), "default:2".to_string()];
        let mut handlers = vec![handler("nodejs10.x", None)];

        apply_library_layers("us-east-1", &mut handlers, &catalog, Some(&defaults));
        assert_eq!(
            handlers[0].config.layers,
            Some(vec![
                "default:1".to_string(),
                "default:2".to_string(),
                "node:2".to_string()
            ])
        );
        assert_eq!(defaults, vec!["default:1".to_string(), "default:2".to_string()]);
    }

    #[test]
    fn test_explicit_empty_list_is_not_reseeded() {
        let catalog = catalog(r#"{ "regions": { "us-east-1": { "nodejs10.x": "node:2" } } }"#);
        let defaults = vec!["default:1".to_string()];
        let mut handlers = vec![handler("nodejs10.x", Some(vec![]))];

        apply_library_layers("us-east-1", &mut handlers, &catalog, Some(&defaults));
        assert_eq!(handlers[0].config.layers, Some(vec!["node:2".to_string()]));
    }

    #[test]
    fn test_library_then_extension_ordering() {
        let catalog = catalog(
            r#"{ "regions": { "us-east-1": { "nodejs10.x": "node:2", "extension": "extension:5" } } }"#,
        );
        let mut handlers = vec![handler("nodejs10.x", None)];

        apply_library_layers("us-east-1", &mut handlers, &catalog, None);
        apply_extension_layer("us-east-1", &mut handlers, &catalog, None);
        assert_eq!(
            handlers[0].config.layers,
            Some(vec!["node:2".to_string(), "extension:5".to_string()])
        );
    }

    #[test]
    fn test_extension_only_catalog() {
        let catalog = catalog(r#"{ "regions": { "us-east-1": { "extension": "extension:5" } } }"#);
        let mut handlers = vec![handler("nodejs10.x", None)];

        apply_library_layers("us-east-1", &mut handlers, &catalog, None);
        apply_extension_layer("us-east-1", &mut handlers, &catalog, None);
        assert_eq!(handlers[0].config.layers, Some(vec!["extension:5".to_string()]));
    }

    #[test]
    fn test_push_layer_arn() {
        let current = push_layer_arn(&["node:2", "extension:5"], Vec::new());
        assert_eq!(current, vec!["node:2".to_string(), "extension:5".to_string()]);

        let current = push_layer_arn(&["extension:5"], vec!["node:2".to_string()]);
        assert_eq!(current, vec!["node:2".to_string(), "extension:5".to_string()]);

        let current = push_layer_arn(&["extension:5"], vec!["extension:5".to_string()]);
        assert_eq!(current, vec!["extension:5".to_string()]);
    }
}
