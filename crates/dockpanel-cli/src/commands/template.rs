//! `dpanel template` — List or render the built-in templates.

use std::path::PathBuf;

use clap::Args;
use dockpanel_common::config::EngineConfig;
use dockpanel_compose::actions::{ActionDispatcher, ComposeAction};
use dockpanel_compose::document::{ComposeDocument, ComposeEngine};
use dockpanel_compose::template::Template;

use super::{PipelineArgs, StoreArgs};

/// Arguments for the `template` command.
#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Template to render; lists the catalog when omitted.
    pub name: Option<String>,

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

/// Executes the `template` command.
///
/// # Errors
///
/// Returns an error if the template is unknown, rejected by the
/// pipeline, or the output cannot be written.
pub fn execute(args: TemplateArgs, config: &EngineConfig) -> anyhow::Result<()> {
    let Some(name) = args.name else {
        for template in Template::ALL {
            println!("{:<14} {}", template.id(), template.description());
        }
        return Ok(());
    };

    let template: Template = name.parse()?;
    let store = super::open_store(&args.store, config);
    let mut dispatcher = ActionDispatcher::new(ComposeEngine::from_config(config), store);
    let mut doc = ComposeDocument::new(args.pipeline.strict || config.strict_by_default);
    dispatcher
        .dispatch(&mut doc, &args.pipeline.vars, ComposeAction::LoadTemplate(template))
        .map_err(|e| super::report(&e))?;
    super::write_document(doc.raw_text(), args.output.as_deref())
}
