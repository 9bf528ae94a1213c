//! CLI command definitions and dispatch.

pub mod check;
pub mod normalize;
pub mod plan;
pub mod remove;
pub mod template;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dockpanel_common::config::EngineConfig;
use dockpanel_common::types::ProjectId;
use dockpanel_compose::error::ComposeError;
use dockpanel_compose::store::{DocumentStore, select_store};

/// Dockpanel — compose configuration checks and transformations.
#[derive(Parser, Debug)]
#[command(name = "dpanel", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Path to a JSON engine configuration file.
    #[arg(long, global = true, env = "DOCKPANEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log engine steps at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a compose file and print its summary.
    Check(check::CheckArgs),
    /// Bind the generated environment file into every service.
    Normalize(normalize::NormalizeArgs),
    /// Remove a service, volume, or network.
    Remove(remove::RemoveArgs),
    /// List or render the built-in templates.
    Template(template::TemplateArgs),
    /// Print the service startup order derived from depends_on.
    Plan(plan::PlanArgs),
}

/// Pipeline options shared by commands that process a document.
#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    /// Enforce the schema and bind the environment file.
    #[arg(long)]
    pub strict: bool,

    /// Declared project variable key (repeatable).
    #[arg(long = "var", value_name = "KEY")]
    pub vars: Vec<String>,
}

/// Project persistence options.
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Persist the result as a snapshot of this project under the data
    /// directory; without it the draft is kept in memory only.
    #[arg(long, value_name = "ID")]
    pub project: Option<String>,
}

/// Picks the store for a command: a file snapshot for a named project,
/// memory for an unnamed draft.
pub(crate) fn open_store(args: &StoreArgs, config: &EngineConfig) -> Box<dyn DocumentStore> {
    let (is_created, id) = match &args.project {
        Some(id) => (true, ProjectId::new(id.as_str())),
        None => (false, ProjectId::generate()),
    };
    tracing::debug!(project = %id, persisted = is_created, "opening document store");
    select_store(is_created, &config.data_dir, id)
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = match cli.config.as_deref() {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    match cli.command {
        Command::Check(args) => check::execute(args, &config),
        Command::Normalize(args) => normalize::execute(args, &config),
        Command::Remove(args) => remove::execute(args, &config),
        Command::Template(args) => template::execute(args, &config),
        Command::Plan(args) => plan::execute(&args),
    }
}

/// Reads a compose file to a string.
pub(crate) fn read_document(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

/// Writes `text` to `output`, or to stdout when no path is given.
pub(crate) fn write_document(text: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("cannot write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote compose document");
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Turns an engine error into a CLI error listing every reason.
pub(crate) fn report(err: &ComposeError) -> anyhow::Error {
    anyhow::anyhow!(
        "{}",
        err.messages()
            .iter()
            .map(|m| format!("  - {m}"))
            .collect::<Vec<_>>()
            .join("\n")
    )
    .context("compose configuration rejected")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_document_round_trips_through_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("compose.yml");
        let text = "services:\n  web:\n    image: nginx\n";

        write_document(text, Some(&path)).expect("should write");
        assert_eq!(read_document(&path).expect("should read"), text);
    }

    #[test]
    fn read_document_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_document(&dir.path().join("absent.yml")).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn named_project_persists_under_data_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = EngineConfig {
            data_dir: dir.path().to_path_buf(),
            ..EngineConfig::default()
        };
        let args = StoreArgs {
            project: Some("demo".into()),
        };
        let mut store = open_store(&args, &config);
        let doc = dockpanel_compose::document::ComposeDocument::new(true);
        store.persist(&doc).expect("should persist");

        let reopened = open_store(&args, &config);
        assert_eq!(reopened.load().expect("should load"), Some(doc));
        assert!(std::fs::read_dir(dir.path()).expect("read dir").next().is_some());
    }

    #[test]
    fn unnamed_draft_stays_in_memory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = EngineConfig {
            data_dir: dir.path().to_path_buf(),
            ..EngineConfig::default()
        };
        let mut store = open_store(&StoreArgs::default(), &config);
        store
            .persist(&dockpanel_compose::document::ComposeDocument::default())
            .expect("should persist");
        assert!(std::fs::read_dir(dir.path()).expect("read dir").next().is_none());
    }
}
