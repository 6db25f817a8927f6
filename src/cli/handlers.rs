//! Command handlers
//!
//! Each handler drives one subcommand end to end and returns a process exit
//! code: 0 on success, 1 when anything failed. Errors are reported on stderr
//! and through tracing; partial monitor failures still print the outcomes
//! that succeeded.

use crate::cli::commands::{InstrumentArgs, MonitorsArgs, OutputFormat};
use crate::config::LayerlineConfig;
use crate::descriptor::{DeploymentDescriptor, YamlDescriptor};
use crate::layers::{apply_extension_layer, apply_library_layers, find_handlers, LayerCatalog};
use crate::monitors::sync_monitors;
use crate::stack::{FixedStackId, StackIdSource};
use anyhow::{bail, Context, Result};
use serde_json::json;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{error, info};

const DEFAULT_DESCRIPTOR: &str = "serverless.yml";

/// Handles `layerline instrument`.
pub async fn handle_instrument(args: &InstrumentArgs) -> i32 {
    match run_instrument(args).await {
        Ok(()) => 0,
        Err(err) => {
            error!(error = %err, "Instrumentation failed");
            eprintln!("Error: {err:#}");
            1
        }
    }
}

/// Handles `layerline monitors`.
pub async fn handle_monitors(args: &MonitorsArgs) -> i32 {
    match run_monitors(args).await {
        Ok(0) => 0,
        Ok(failures) => {
            error!(failures, "Some monitors failed to sync");
            1
        }
        Err(err) => {
            error!(error = %err, "Monitor sync failed");
            eprintln!("Error: {err:#}");
            1
        }
    }
}

async fn run_instrument(args: &InstrumentArgs) -> Result<()> {
    let path = args
        .descriptor
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DESCRIPTOR));

    let mut descriptor = YamlDescriptor::load(&path).context("failed to load descriptor")?;

    let settings = descriptor.settings();
    if !settings.enabled {
        info!("Instrumentation disabled via custom.layerline.enabled");
        return Ok(());
    }

    let Some(region) = args.region.clone().or_else(|| descriptor.region()) else {
        bail!("no region declared in the descriptor and none passed via --region");
    };

    let catalog = match &args.catalog {
        Some(path) => LayerCatalog::from_path(path).context("failed to load layer catalog")?,
        None => LayerCatalog::builtin(),
    };

    let mut excluded: HashSet<String> = settings.exclude.iter().cloned().collect();
    excluded.extend(args.exclude.iter().cloned());

    let default_layers = descriptor.default_layers();
    let mut handlers = find_handlers(&descriptor, &excluded);
    info!(region = %region, functions = handlers.len(), "Instrumenting deployment");

    if settings.add_layers {
        apply_library_layers(&region, &mut handlers, &catalog, default_layers.as_deref());
    }
    if settings.add_extension {
        apply_extension_layer(&region, &mut handlers, &catalog, default_layers.as_deref());
    }

    match args.format {
        OutputFormat::Human => {
            for handler in &handlers {
                match &handler.config.layers {
                    Some(layers) => println!("{}: {}", handler.name, layers.join(", ")),
                    None => println!("{}: (no layers)", handler.name),
                }
            }
        }
        OutputFormat::Json => {
            let report: Vec<_> = handlers
                .iter()
                .map(|handler| {
                    json!({
                        "function": handler.name,
                        "runtime": handler.runtime,
                        "layers": handler.config.layers,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if args.dry_run {
        info!("Dry run, descriptor left unchanged");
        return Ok(());
    }

    for handler in handlers {
        descriptor.set_function(&handler.name, handler.config);
    }
    descriptor
        .save_to(&path)
        .context("failed to write descriptor")?;

    Ok(())
}

/// Returns the number of monitors that failed to sync.
async fn run_monitors(args: &MonitorsArgs) -> Result<usize> {
    let path = args
        .descriptor
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DESCRIPTOR));

    let descriptor = YamlDescriptor::load(&path).context("failed to load descriptor")?;

    let desired = descriptor.settings().monitors;
    if desired.is_empty() {
        info!("No monitors declared under custom.layerline.monitors");
        return Ok(0);
    }

    let mut config = LayerlineConfig::default();
    if let Some(site) = &args.site {
        config.site = site.clone();
    }
    let client = config.monitors_client()?;

    // The identity lookup collaborator may legitimately come back empty
    let stack_source = FixedStackId::new(args.stack_id.clone().unwrap_or(config.stack_id));
    let stack_id = stack_source.stack_id();

    let outcomes = sync_monitors(&client, &desired, &stack_id)
        .await
        .context("monitor reconciliation aborted")?;

    let mut failures = 0;
    match args.format {
        OutputFormat::Human => {
            for outcome in &outcomes {
                match &outcome.result {
                    Ok(action) => println!("{}: {}", outcome.monitor_id, action.as_str()),
                    Err(err) => {
                        failures += 1;
                        println!("{}: failed ({err})", outcome.monitor_id);
                    }
                }
            }
        }
        OutputFormat::Json => {
            let report: Vec<_> = outcomes
                .iter()
                .map(|outcome| match &outcome.result {
                    Ok(action) => json!({ "monitor": outcome.monitor_id, "action": action.as_str() }),
                    Err(err) => {
                        failures += 1;
                        json!({ "monitor": outcome.monitor_id, "error": err.to_string() })
                    }
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(failures)
}
