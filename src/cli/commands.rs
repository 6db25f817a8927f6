use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Attaches observability layers to serverless functions and syncs monitors
#[derive(Parser, Debug)]
#[command(
    name = "layerline",
    about = "Attaches observability layers to serverless functions and syncs monitors",
    version,
    author,
    long_about = "layerline reads a serverless deployment descriptor, attaches the matching \
                  runtime library and extension layers to every supported function, and \
                  reconciles the monitors declared in the descriptor against the remote \
                  monitoring account."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Increase verbosity")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Attach layers to the functions of a deployment descriptor",
        long_about = "Reads the descriptor, resolves the library and extension layer for each \
                      supported function, and writes the merged layer lists back.\n\n\
                      Examples:\n  \
                      layerline instrument\n  \
                      layerline instrument service/serverless.yml\n  \
                      layerline instrument --region us-east-1 --dry-run\n  \
                      layerline instrument --catalog ./layers.json --exclude warmup"
    )]
    Instrument(InstrumentArgs),

    #[command(
        about = "Reconcile declared monitors against the remote account",
        long_about = "Reads the monitor definitions from custom.layerline.monitors and creates, \
                      updates, or deletes remote monitors so they match.\n\n\
                      Examples:\n  \
                      layerline monitors\n  \
                      layerline monitors --stack-id arn:aws:cloudformation:...:stack/app/1234"
    )]
    Monitors(MonitorsArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct InstrumentArgs {
    #[arg(
        value_name = "DESCRIPTOR",
        help = "Path to the deployment descriptor (defaults to serverless.yml)"
    )]
    pub descriptor: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Layer catalog JSON (defaults to the built-in snapshot)")]
    pub catalog: Option<PathBuf>,

    #[arg(long, value_name = "REGION", help = "Override the descriptor's region")]
    pub region: Option<String>,

    #[arg(long, value_name = "NAME", help = "Additional function names to skip")]
    pub exclude: Vec<String>,

    #[arg(long, help = "Print the resulting layer lists without writing the descriptor")]
    pub dry_run: bool,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct MonitorsArgs {
    #[arg(
        value_name = "DESCRIPTOR",
        help = "Path to the deployment descriptor (defaults to serverless.yml)"
    )]
    pub descriptor: Option<PathBuf>,

    #[arg(long, value_name = "STACK_ID", help = "Cloud-stack identity scoping monitor ownership")]
    pub stack_id: Option<String>,

    #[arg(long, value_name = "SITE", help = "Monitor API site, e.g. datadoghq.eu")]
    pub site: Option<String>,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary
    Human,
    /// Machine-readable JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_instrument() {
        let args = CliArgs::parse_from([
            "layerline",
            "instrument",
            "svc/serverless.yml",
            "--region",
            "eu-west-1",
            "--exclude",
            "warmup",
            "--dry-run",
        ]);
        match args.command {
            Commands::Instrument(instrument) => {
                assert_eq!(instrument.descriptor.unwrap(), PathBuf::from("svc/serverless.yml"));
                assert_eq!(instrument.region.as_deref(), Some("eu-west-1"));
                assert_eq!(instrument.exclude, vec!["warmup".to_string()]);
                assert!(instrument.dry_run);
                assert_eq!(instrument.format, OutputFormat::Human);
            }
            _ => panic!("expected instrument subcommand"),
        }
    }

    #[test]
    fn test_parse_monitors_with_json_output() {
        let args = CliArgs::parse_from(["layerline", "monitors", "--stack-id", "stack-1", "-f", "json"]);
        match args.command {
            Commands::Monitors(monitors) => {
                assert_eq!(monitors.stack_id.as_deref(), Some("stack-1"));
                assert_eq!(monitors.format, OutputFormat::Json);
            }
            _ => panic!("expected monitors subcommand"),
        }
    }
}
