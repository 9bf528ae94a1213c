//! `dpanel remove` — Remove a service, volume, or network from a compose file.

use std::path::PathBuf;

use clap::Args;
use dockpanel_common::config::EngineConfig;
use dockpanel_common::types::CollectionKind;
use dockpanel_compose::actions::{ActionDispatcher, ComposeAction};
use dockpanel_compose::document::{ComposeDocument, ComposeEngine};

use super::{PipelineArgs, StoreArgs};

/// Arguments for the `remove` command.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Path to the compose file.
    pub file: PathBuf,

    /// Collection to remove from: services, volumes, or networks.
    pub kind: CollectionKind,

    /// Name of the entry to remove.
    pub name: String,

    /// Pipeline options.
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Persistence options.
    #[command(flatten)]
    pub store: StoreArgs,

    /// Write output to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Executes the `remove` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the document or the
/// removal is rejected, or the output cannot be written.
pub fn execute(args: RemoveArgs, config: &EngineConfig) -> anyhow::Result<()> {
    let text = super::read_document(&args.file)?;
    let store = super::open_store(&args.store, config);
    let mut dispatcher = ActionDispatcher::new(ComposeEngine::from_config(config), store);
    let vars = &args.pipeline.vars;

    let mut doc = ComposeDocument::new(args.pipeline.strict);
    dispatcher
        .dispatch(&mut doc, vars, ComposeAction::Import(text))
        .map_err(|e| super::report(&e))?;
    if !doc.summary().contains(args.kind, &args.name) {
        tracing::warn!(kind = %args.kind, name = %args.name, "entry not found, document unchanged");
    }
    dispatcher
        .dispatch(
            &mut doc,
            vars,
            ComposeAction::Remove {
                kind: args.kind,
                name: args.name,
            },
        )
        .map_err(|e| super::report(&e))?;
    super::write_document(doc.raw_text(), args.output.as_deref())
}
