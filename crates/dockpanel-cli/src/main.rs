//! # dpanel — Dockpanel CLI
//!
//! Checks, normalizes, and edits compose configurations with the same
//! engine the control panel uses.

mod commands;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);
    commands::execute(cli)
}

fn init_logging(verbose: bool, json: bool) {
    let default = if verbose {
        "dockpanel_compose=debug,dockpanel_cli=debug,info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}
