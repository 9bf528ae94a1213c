//! Compose document state machine.
//!
//! A [`ComposeDocument`] is owned by the caller and handed to the
//! [`ComposeEngine`] for every action that needs the pipeline. Each action
//! computes a candidate next state first and only then swaps it in, so a
//! failure leaves the document exactly as it was.

use dockpanel_common::config::EngineConfig;
use dockpanel_common::types::CollectionKind;
use serde::{Deserialize, Serialize};

use crate::catalog::VariableCatalog;
use crate::error::{ComposeError, Result};
use crate::normalizer::{self, NormalizeOptions};
use crate::parser::{self, ast::ComposeTree, validator};
use crate::remover::{self, Removal};
use crate::summary::{self, ComposeSummary};
use crate::template::Template;

/// Where a document sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentState {
    /// No text and never saved.
    Empty,
    /// Text changed since the last save; the summary may be stale.
    Editing,
    /// Text validated, normalized, and summarized.
    Saved,
}

/// The compose configuration of one project draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeDocument {
    raw_text: String,
    is_saved: bool,
    is_strict: bool,
    summary: ComposeSummary,
}

impl ComposeDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new(strict: bool) -> Self {
        Self {
            is_strict: strict,
            ..Self::default()
        }
    }

    /// Creates an empty document using the configured default mode.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.strict_by_default)
    }

    /// Current raw text.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Whether the text was committed by the last action.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        self.is_saved
    }

    /// Whether strict mode is on.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.is_strict
    }

    /// Summary of the last committed text. Only trustworthy while
    /// [`Self::is_saved`] is true.
    #[must_use]
    pub const fn summary(&self) -> &ComposeSummary {
        &self.summary
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> DocumentState {
        if self.is_saved {
            DocumentState::Saved
        } else if self.raw_text.is_empty() {
            DocumentState::Empty
        } else {
            DocumentState::Editing
        }
    }

    /// Replaces the raw text without parsing it.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.is_saved = false;
        self.raw_text = text.into();
    }

    /// Flips strict mode. The text is not re-parsed until the next save.
    pub fn toggle_strict(&mut self) {
        self.is_strict = !self.is_strict;
        self.is_saved = false;
        tracing::debug!(strict = self.is_strict, "toggled strict mode");
    }

    /// Discards the draft: empty text, strict mode off, empty summary.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn commit(&mut self, processed: Processed) {
        self.raw_text = processed.raw_text;
        self.summary = processed.summary;
        self.is_saved = true;
    }
}

/// Output of one successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    /// Text to store: canonical in strict mode, verbatim otherwise.
    pub raw_text: String,
    /// Summary extracted from the same tree.
    pub summary: ComposeSummary,
}

/// Runs the parse, validate, normalize, and summarize pipeline against
/// caller-owned documents.
#[derive(Debug, Clone)]
pub struct ComposeEngine {
    env_file: String,
}

impl Default for ComposeEngine {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl ComposeEngine {
    /// Creates an engine that binds `env_file` in strict mode.
    #[must_use]
    pub fn new(env_file: impl Into<String>) -> Self {
        Self {
            env_file: env_file.into(),
        }
    }

    /// Creates an engine from the workspace configuration.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.env_file.clone())
    }

    /// Path of the environment file bound in strict mode.
    #[must_use]
    pub fn env_file(&self) -> &str {
        &self.env_file
    }

    /// Runs the full pipeline on `text` without touching any document.
    ///
    /// Strict mode validates the schema, binds the environment file, and
    /// returns canonical text. Lax mode only requires well-formed YAML and
    /// keeps the text verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::EmptyDocument`], [`ComposeError::MalformedDocument`],
    /// or [`ComposeError::Schema`].
    pub fn process(
        &self,
        text: &str,
        strict: bool,
        variables: &(impl VariableCatalog + ?Sized),
    ) -> Result<Processed> {
        let mut tree = parser::parse(text)?;
        if !strict {
            return Ok(Processed {
                raw_text: text.to_owned(),
                summary: summary::extract(&tree),
            });
        }

        validator::validate(&tree)?;
        let bound = normalizer::normalize(
            &mut tree,
            NormalizeOptions {
                strict,
                variable_count: variables.count(),
                env_file: &self.env_file,
            },
        );
        tracing::debug!(services = bound, "strict normalization applied");
        Ok(Processed {
            raw_text: parser::serialize(&tree)?,
            summary: summary::extract(&tree),
        })
    }

    /// Validates and commits the document's current text.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error; the document is left unchanged.
    pub fn save(
        &self,
        doc: &mut ComposeDocument,
        variables: &(impl VariableCatalog + ?Sized),
    ) -> Result<()> {
        let processed = self
            .process(&doc.raw_text, doc.is_strict, variables)
            .inspect_err(|e| tracing::warn!(error = %e, "save rejected"))?;
        doc.commit(processed);
        tracing::info!(services = doc.summary.services.len(), "compose document saved");
        Ok(())
    }

    /// Replaces the document with imported text, committing it at once.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error; the document is left unchanged.
    pub fn import(
        &self,
        doc: &mut ComposeDocument,
        text: &str,
        variables: &(impl VariableCatalog + ?Sized),
    ) -> Result<()> {
        let processed = self
            .process(text, doc.is_strict, variables)
            .inspect_err(|e| tracing::warn!(error = %e, "import rejected"))?;
        doc.commit(processed);
        tracing::info!(bytes = text.len(), "compose document imported");
        Ok(())
    }

    /// Replaces the document with a built-in template.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error; the document is left unchanged.
    pub fn load_template(
        &self,
        doc: &mut ComposeDocument,
        template: Template,
        variables: &(impl VariableCatalog + ?Sized),
    ) -> Result<()> {
        tracing::info!(%template, "loading template");
        self.import(doc, template.source(), variables)
    }

    /// Removes a named entry and commits the result.
    ///
    /// Returns `false` when the entry did not exist, in which case the
    /// document is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Rejected`] before any parsing when the entry
    /// is the last service, or the pipeline error of the edited text.
    pub fn remove_element(
        &self,
        doc: &mut ComposeDocument,
        kind: CollectionKind,
        name: &str,
        variables: &(impl VariableCatalog + ?Sized),
    ) -> Result<bool> {
        remover::guard(
            kind,
            doc.summary.contains(kind, name),
            doc.summary.count(kind),
        )
        .inspect_err(|e| tracing::warn!(%kind, name, reason = %e, "removal rejected"))?;

        if doc.raw_text.is_empty() {
            return Ok(false);
        }
        let tree = parser::parse(&doc.raw_text)?;
        let next = match remover::remove(&tree, kind, name)? {
            Removal::Unchanged => return Ok(false),
            Removal::Removed(next) => next,
        };
        let processed = self.process(&parser::serialize(&next)?, doc.is_strict, variables)?;
        doc.commit(processed);
        tracing::info!(%kind, name, "{} removed", kind.singular());
        Ok(true)
    }

    /// Replaces the text with a document holding empty collections.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Rejected`] in strict mode, where a document
    /// must keep at least one service.
    pub fn clear(
        &self,
        doc: &mut ComposeDocument,
        variables: &(impl VariableCatalog + ?Sized),
    ) -> Result<()> {
        if doc.is_strict {
            tracing::warn!("clear rejected in strict mode");
            return Err(ComposeError::rejected(
                "cannot clear the configuration while strict mode is on",
            ));
        }
        let text = parser::serialize(&ComposeTree::empty())?;
        let processed = self.process(&text, doc.is_strict, variables)?;
        doc.commit(processed);
        tracing::info!("compose document cleared");
        Ok(())
    }
}
