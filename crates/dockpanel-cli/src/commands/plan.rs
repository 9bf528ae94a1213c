//! `dpanel plan` — Print the service startup order.

use std::path::PathBuf;

use clap::Args;
use dockpanel_compose::{graph, parser};

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Path to the compose file.
    #[arg(default_value = "docker-compose.yml")]
    pub file: PathBuf,
}

/// Executes the `plan` command.
///
/// Parses the compose file, builds the `depends_on` graph, and prints
/// services dependencies-first.
///
/// # Errors
///
/// Returns an error if parsing fails or the graph has a cycle.
pub fn execute(args: &PlanArgs) -> anyhow::Result<()> {
    let text = super::read_document(&args.file)?;
    let tree = parser::parse(&text).map_err(|e| super::report(&e))?;
    let order = graph::startup_order(&tree).map_err(|e| super::report(&e))?;

    println!("Startup order for: {}", args.file.display());
    println!();
    for (i, name) in order.iter().enumerate() {
        println!("  {}. {name}", i + 1);
    }
    println!();
    println!("  {} service(s).", order.len());
    Ok(())
}
