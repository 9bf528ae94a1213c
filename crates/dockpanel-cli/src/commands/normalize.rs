//! `dpanel normalize` — Bind the generated environment file into every service.

use std::path::PathBuf;

use clap::Args;
use dockpanel_common::config::EngineConfig;
use dockpanel_compose::document::ComposeEngine;

/// Arguments for the `normalize` command.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Path to the compose file.
    #[arg(default_value = "docker-compose.yml")]
    pub file: PathBuf,

    /// Declared project variable key (repeatable). Without any, the
    /// document is only validated and canonicalized.
    #[arg(long = "var", value_name = "KEY")]
    pub vars: Vec<String>,

    /// Override the environment file to bind.
    #[arg(long)]
    pub env_file: Option<String>,

    /// Write output to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Executes the `normalize` command.
///
/// Always runs in strict mode.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is rejected, or the
/// output cannot be written.
pub fn execute(args: NormalizeArgs, config: &EngineConfig) -> anyhow::Result<()> {
    let text = super::read_document(&args.file)?;
    let engine = args
        .env_file
        .map_or_else(|| ComposeEngine::from_config(config), ComposeEngine::new);
    tracing::info!(path = %args.file.display(), env_file = engine.env_file(), "normalizing compose file");

    let processed = engine
        .process(&text, true, &args.vars)
        .map_err(|e| super::report(&e))?;
    super::write_document(&processed.raw_text, args.output.as_deref())
}
