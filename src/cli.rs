//! Command-line interface for diagram-export.
//!
//! Resolves configuration, picks the diagram entries and drives a single
//! export run.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use crate::catalog::builtin_entries;
use crate::config::{ConfigError, DiagramEntry, DiagramManifest, ExportConfig, select_entries};
use crate::debug::DebugLevel;
use crate::progress::{ConsoleProgress, print_banner, summary_line};
use crate::render::{DiagramExporter, Endpoint, HttpFetcher};

/// Exit code for configuration and usage errors.
pub const EXIT_USAGE: i32 = 2;

/// diagram-export - render Mermaid diagrams to PNG through a remote renderer
#[derive(Parser, Debug)]
#[command(name = "diagram-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory that receives the rendered images (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Config file (default: ~/.config/diagram-export/config.yaml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Render the diagrams listed in a YAML manifest instead of the built-in set
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Only render the named diagram (repeatable)
    #[arg(long, value_name = "NAME")]
    pub only: Vec<String>,

    /// Print the diagram names and exit
    #[arg(long)]
    pub list: bool,

    /// Print the request URLs without fetching or writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Number of diagrams rendered concurrently
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Rendering endpoint base URL
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Log level for the debug log
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<DebugLevel>,
}

impl Cli {
    /// Apply flag overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut ExportConfig) {
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
    }
}

/// Load the config named on the command line, or the default one.
pub fn load_config(path: Option<&Path>) -> Result<ExportConfig, ConfigError> {
    match path {
        Some(path) => ExportConfig::load_from(path),
        None => ExportConfig::load(),
    }
}

/// Entries for this run: manifest or built-in catalog, filtered by `--only`.
pub fn load_entries(
    manifest: Option<&Path>,
    only: &[String],
) -> Result<Vec<DiagramEntry>, ConfigError> {
    let entries = match manifest {
        Some(path) => DiagramManifest::load(path)?.into_entries(),
        None => builtin_entries(),
    };
    select_entries(entries, only)
}

/// Run the CLI and return the process exit code.
///
/// Partial render failure still exits 0; only errors that prevent the run
/// from starting produce a non-zero code.
pub fn run(cli: Cli) -> i32 {
    match execute(&cli) {
        Ok(()) => 0,
        Err(e) => {
            debug_error!("CLI", "{e:#}");
            eprintln!("diagram-export: error: {e:#}");
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &anyhow::Error) -> i32 {
    if error.downcast_ref::<ConfigError>().is_some() {
        EXIT_USAGE
    } else {
        1
    }
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let entries = load_entries(cli.manifest.as_deref(), &cli.only)?;
    debug_info!("CLI", "{} diagrams selected", entries.len());

    if cli.list {
        for entry in &entries {
            println!("{}", entry.name);
        }
        return Ok(());
    }

    let fetcher = HttpFetcher::from_config(&config);
    let exporter =
        DiagramExporter::new(fetcher, Endpoint::from_config(&config)).with_jobs(config.jobs);

    if cli.dry_run {
        for request in exporter.plan(&entries) {
            println!("{}\t{}", request.name, request.url);
        }
        return Ok(());
    }

    let output_dir = config.resolve_output_dir(cli.output_dir.as_deref())?;
    debug_log!("CLI", "Resolved output directory {:?}", output_dir);

    print_banner("Mermaid diagram export");
    println!("Output directory: {}", output_dir.display());
    println!();

    let summary = exporter
        .export_all(&entries, &output_dir, &ConsoleProgress)
        .with_context(|| format!("export to {} failed", output_dir.display()))?;

    println!();
    println!("{}", summary_line(&summary));
    println!("Images saved in: {}", output_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["diagram-export"]).expect("parse");
        assert!(cli.output_dir.is_none());
        assert!(cli.only.is_empty());
        assert!(!cli.list && !cli.dry_run);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "diagram-export",
            "-o",
            "/tmp/out",
            "--only",
            "a",
            "--only",
            "b",
            "-j",
            "4",
            "--timeout",
            "45",
            "--log-level",
            "debug",
        ])
        .expect("parse");
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(cli.only, ["a", "b"]);
        assert_eq!(cli.jobs, Some(4));
        assert_eq!(cli.log_level, Some(DebugLevel::Debug));

        let mut config = ExportConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.jobs, 4);
        assert_eq!(config.timeout_secs, 45);
        assert_eq!(config.endpoint, ExportConfig::default().endpoint);
    }

    #[test]
    fn test_bad_log_level_rejected() {
        assert!(Cli::try_parse_from(["diagram-export", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_config_errors_map_to_usage_exit() {
        let err = anyhow::Error::from(ConfigError::MissingOutputDir);
        assert_eq!(exit_code_for(&err), EXIT_USAGE);

        let err = anyhow::anyhow!("disk on fire");
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn test_load_entries_builtin_filtered() {
        let only = vec!["05_ifu_state_machine".to_string()];
        let entries = load_entries(None, &only).expect("entries");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "05_ifu_state_machine");
    }

    #[test]
    fn test_load_entries_unknown_name() {
        let only = vec!["08_missing".to_string()];
        assert!(matches!(
            load_entries(None, &only),
            Err(ConfigError::UnknownName(_))
        ));
    }
}
