//! `dpanel check` — Validate a compose file and print its summary.

use std::path::PathBuf;

use clap::Args;
use dockpanel_common::config::EngineConfig;
use dockpanel_compose::document::ComposeEngine;

use super::PipelineArgs;

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the compose file.
    #[arg(default_value = "docker-compose.yml")]
    pub file: PathBuf,

    /// Pipeline options.
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `check` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the document is rejected.
pub fn execute(args: CheckArgs, config: &EngineConfig) -> anyhow::Result<()> {
    tracing::info!(path = %args.file.display(), strict = args.pipeline.strict, "checking compose file");
    let text = super::read_document(&args.file)?;
    let engine = ComposeEngine::from_config(config);
    let processed = engine
        .process(&text, args.pipeline.strict, &args.pipeline.vars)
        .map_err(|e| super::report(&e))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&processed.summary)?);
    } else {
        print!("{}", crate::output::render_summary(&processed.summary));
    }
    Ok(())
}
