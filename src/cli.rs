/// Command-line front end
///
/// Parses arguments, sets up logging, runs the workflow, and prints the summary
/// either as pretty JSON or as one `OK`/`FAIL` line per step.

use crate::{
    api::run_workflow_with,
    config::ConfigOverrides,
    workflow::{RunStatus, WorkflowSummary},
};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Run a DriftFlow workflow
#[derive(Debug, Parser)]
#[command(name = "driftflow", version, about = "Run a DriftFlow workflow")]
pub struct Cli {
    /// Path to JSON config
    #[arg(long, default_value = "./config.json")]
    pub config: PathBuf,

    /// Print the raw JSON summary instead of per-step lines
    #[arg(long)]
    pub print_json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Log filter for this invocation; `RUST_LOG` wins when set
    fn log_filter(&self) -> EnvFilter {
        if std::env::var_os("RUST_LOG").is_some() {
            return EnvFilter::from_default_env();
        }
        let level = match self.verbose {
            _ if self.quiet => "error",
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        EnvFilter::new(level)
    }
}

/// Binary entry point: logging, run, print, exit status
pub fn main_with(cli: Cli) -> Result<ExitCode> {
    // Logs go to stderr so stdout stays clean for the summary
    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    let status = execute(&cli, &mut stdout.lock())?;

    Ok(ExitCode::from(exit_status(status)))
}

/// Process exit status for a finished run: 0 when ok, 1 when any step failed
pub fn exit_status(status: RunStatus) -> u8 {
    if status.is_ok() {
        0
    } else {
        1
    }
}

/// Run the configured workflow and write its summary to `out`
pub fn execute(cli: &Cli, out: &mut impl Write) -> Result<RunStatus> {
    tracing::info!("Starting DriftFlow with config {}", cli.config.display());

    let overrides = ConfigOverrides::from_env();
    let summary = run_workflow_with(&cli.config, &overrides)
        .with_context(|| format!("workflow run failed for {}", cli.config.display()))?;

    if cli.print_json {
        let json = serde_json::to_string_pretty(&summary).context("failed to encode summary")?;
        writeln!(out, "{json}")?;
    } else {
        out.write_all(render_text(&summary).as_bytes())?;
    }
    out.flush()?;

    Ok(summary.status)
}

/// Human-readable summary, one line per step result
pub fn render_text(summary: &WorkflowSummary) -> String {
    summary
        .results
        .iter()
        .map(|result| {
            if result.ok {
                format!("OK {}: {}\n", result.name, result.output.as_deref().unwrap_or_default())
            } else {
                format!("FAIL {}: {}\n", result.name, result.error.as_deref().unwrap_or_default())
            }
        })
        .collect()
}
