//! Action registry for compose documents.
//!
//! Every user action is expressed as a [`ComposeAction`] and dispatched
//! against a caller-owned document. The dispatcher runs the action on a
//! candidate copy, persists the candidate, and only then swaps it in.

use std::fmt;

use dockpanel_common::types::CollectionKind;

use crate::catalog::VariableCatalog;
use crate::document::{ComposeDocument, ComposeEngine};
use crate::error::Result;
use crate::store::DocumentStore;
use crate::template::Template;

/// A user-initiated action on a compose document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeAction {
    /// Replace the raw text; nothing is parsed.
    Edit(String),
    /// Validate, normalize, and commit the current text.
    Save,
    /// Flip strict mode.
    ToggleStrict,
    /// Replace the text with empty collections.
    Clear,
    /// Discard the draft entirely.
    Reset,
    /// Replace the document with imported text.
    Import(String),
    /// Replace the document with a built-in template.
    LoadTemplate(Template),
    /// Remove a named entry from a collection.
    Remove {
        /// Collection to remove from.
        kind: CollectionKind,
        /// Entry name.
        name: String,
    },
}

impl fmt::Display for ComposeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edit(_) => write!(f, "edit"),
            Self::Save => write!(f, "save"),
            Self::ToggleStrict => write!(f, "toggle-strict"),
            Self::Clear => write!(f, "clear"),
            Self::Reset => write!(f, "reset"),
            Self::Import(_) => write!(f, "import"),
            Self::LoadTemplate(t) => write!(f, "load-template {t}"),
            Self::Remove { kind, name } => write!(f, "remove {} {name}", kind.singular()),
        }
    }
}

/// Runs actions through the engine and persists their result.
#[derive(Debug)]
pub struct ActionDispatcher<S> {
    engine: ComposeEngine,
    store: S,
}

impl<S: DocumentStore> ActionDispatcher<S> {
    /// Creates a dispatcher over an engine and a store.
    pub const fn new(engine: ComposeEngine, store: S) -> Self {
        Self { engine, store }
    }

    /// The engine actions run through.
    pub const fn engine(&self) -> &ComposeEngine {
        &self.engine
    }

    /// The persistence store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Applies `action` to `doc`.
    ///
    /// On any failure, whether in the engine or in the store, `doc` is
    /// left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns the engine error or the store error.
    pub fn dispatch(
        &mut self,
        doc: &mut ComposeDocument,
        variables: &(impl VariableCatalog + ?Sized),
        action: ComposeAction,
    ) -> Result<()> {
        tracing::debug!(%action, "dispatching compose action");
        let mut candidate = doc.clone();
        match action {
            ComposeAction::Edit(text) => candidate.edit(text),
            ComposeAction::Save => self.engine.save(&mut candidate, variables)?,
            ComposeAction::ToggleStrict => candidate.toggle_strict(),
            ComposeAction::Clear => self.engine.clear(&mut candidate, variables)?,
            ComposeAction::Reset => candidate.reset(),
            ComposeAction::Import(text) => self.engine.import(&mut candidate, &text, variables)?,
            ComposeAction::LoadTemplate(template) => {
                self.engine
                    .load_template(&mut candidate, template, variables)?;
            }
            ComposeAction::Remove { kind, name } => {
                if !self
                    .engine
                    .remove_element(&mut candidate, kind, &name, variables)?
                {
                    return Ok(());
                }
            }
        }
        self.store.persist(&candidate)?;
        *doc = candidate;
        Ok(())
    }
}
