//! CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::mwapi::RevisionSelect;

/// Etiquetar: topic-model training harness
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "etiquetar")]
#[command(version)]
#[command(
    about = "Dataset preparation and tuning harness for multi-label topic classifiers"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run stale pipeline stages from a manifest
    Run(RunArgs),

    /// Show the freshness of every pipeline stage
    Status(StatusArgs),

    /// Validate a pipeline manifest without running it
    Validate(ValidateArgs),

    /// Display information about a pipeline manifest
    Info(InfoArgs),

    /// Fetch article text for observations from a MediaWiki API
    FetchText(FetchTextArgs),

    /// Fetch the WikiProject directory as a machine-readable taxonomy
    FetchProjects(FetchProjectsArgs),

    /// Replace observation text with the trainer's word cache
    Extract(ExtractArgs),

    /// Derive label configuration from labeled observations
    Labels(LabelsArgs),

    /// Expand a tuning params grid
    Grid(GridArgs),

    /// Render a markdown tuning report from grid and results
    Report(ReportArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct RunArgs {
    /// Path to the pipeline manifest
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Run only this stage and its stale prerequisites
    #[arg(short, long)]
    pub stage: Option<String>,

    /// Rerun stages even when their outputs are fresh
    #[arg(short, long)]
    pub force: bool,

    /// Print what would run without executing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the status command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct StatusArgs {
    /// Path to the pipeline manifest
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to the pipeline manifest
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Path to the pipeline manifest
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the fetch-text command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct FetchTextArgs {
    /// MediaWiki host, e.g. "https://en.wikipedia.org"
    #[arg(long)]
    pub api_host: String,

    /// Observations file (defaults to stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of parallel query threads
    #[arg(short, long, default_value_t = 4)]
    pub threads: usize,

    /// Which revision to fetch text from (latest, first)
    #[arg(long, default_value = "latest")]
    pub revision: RevisionSelect,
}

/// Arguments for the fetch-projects command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct FetchProjectsArgs {
    /// MediaWiki host hosting the directory
    #[arg(long, default_value = "https://en.wikipedia.org")]
    pub api_host: String,

    /// Directory root page
    #[arg(long, default_value = crate::projects::DIRECTORY_PAGE)]
    pub root: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the extract command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ExtractArgs {
    /// Observations file (defaults to stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of parallel extractors (defaults to the CPU count)
    #[arg(short, long)]
    pub threads: Option<usize>,
}

/// Arguments for the labels command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct LabelsArgs {
    /// Labeled observations file
    #[arg(value_name = "OBSERVATIONS")]
    pub observations: PathBuf,

    /// Taxonomy file for remapping WikiProject labels to mid-level
    /// categories
    #[arg(short, long)]
    pub taxonomy: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the grid command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct GridArgs {
    /// Path to the params-grid YAML
    #[arg(value_name = "PARAMS")]
    pub params: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the report command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ReportArgs {
    /// Path to the params-grid YAML
    #[arg(value_name = "PARAMS")]
    pub params: PathBuf,

    /// Path to the tuner's JSON-lines results
    #[arg(value_name = "RESULTS")]
    pub results: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Output format for info and grid commands
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(format!("Unknown output format: {s}. Valid formats: text, json, yaml")),
        }
    }
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_command() {
        let cli = parse_args(["etiquetar", "run", "pipeline.yaml", "--stage", "train"]).unwrap();
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.manifest, PathBuf::from("pipeline.yaml"));
                assert_eq!(args.stage.as_deref(), Some("train"));
                assert!(!args.force);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_parse_fetch_text_defaults() {
        let cli = parse_args([
            "etiquetar",
            "fetch-text",
            "--api-host",
            "https://en.wikipedia.org",
        ])
        .unwrap();
        match cli.command {
            Command::FetchText(args) => {
                assert_eq!(args.threads, 4);
                assert_eq!(args.revision, RevisionSelect::Latest);
                assert!(args.input.is_none());
            }
            _ => panic!("expected fetch-text command"),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = parse_args(["etiquetar", "--verbose", "status", "pipeline.yaml"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_missing_required_args_rejected() {
        assert!(parse_args(["etiquetar", "fetch-text"]).is_err());
        assert!(parse_args(["etiquetar", "report", "params.yaml"]).is_err());
    }
}
