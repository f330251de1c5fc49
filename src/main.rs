/// DriftFlow: declarative step runner
///
/// Main entry point for the `driftflow` binary. Parses arguments and hands off
/// to the CLI layer, which loads the config, runs the workflow, and prints the
/// summary.

use clap::Parser;
use driftflow::cli::{main_with, Cli};
use std::process::ExitCode;

/// Application entry point
///
/// Exits 0 when every step succeeded and 1 when any step failed or the run
/// could not complete (bad config, audit write failure).
fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    main_with(cli)
}
