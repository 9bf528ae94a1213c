//! Persistence strategies for committed documents.
//!
//! Drafts that have not been created yet live in memory; created projects
//! are persisted as JSON snapshots. The engine never knows which store is
//! active; the action dispatcher calls it after a successful action.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use dockpanel_common::constants::SNAPSHOT_EXTENSION;
use dockpanel_common::error::{DockpanelError, Result};
use dockpanel_common::types::ProjectId;
use serde::{Deserialize, Serialize};

use crate::document::ComposeDocument;

/// Final persistence step of every action.
pub trait DocumentStore {
    /// Stores the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be stored.
    fn persist(&mut self, doc: &ComposeDocument) -> Result<()>;

    /// Returns the last stored document, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored document cannot be read.
    fn load(&self) -> Result<Option<ComposeDocument>>;
}

/// In-memory store used before a project is created.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    current: Option<ComposeDocument>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn persist(&mut self, doc: &ComposeDocument) -> Result<()> {
        self.current = Some(doc.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<ComposeDocument>> {
        Ok(self.current.clone())
    }
}

/// On-disk record of a persisted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Owning project.
    pub project_id: ProjectId,
    /// When the snapshot was written.
    pub updated_at: DateTime<Utc>,
    /// The committed document.
    pub document: ComposeDocument,
}

/// Store for created projects: one JSON snapshot per project.
#[derive(Debug, Clone)]
pub struct FileStore {
    project_id: ProjectId,
    path: PathBuf,
}

impl FileStore {
    /// Creates a store writing to `<dir>/<project_id>.json`.
    #[must_use]
    pub fn new(dir: &Path, project_id: ProjectId) -> Self {
        let path = dir
            .join(project_id.as_str())
            .with_extension(SNAPSHOT_EXTENSION);
        Self { project_id, path }
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> DockpanelError {
        DockpanelError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl DocumentStore for FileStore {
    fn persist(&mut self, doc: &ComposeDocument) -> Result<()> {
        tracing::debug!(path = %self.path.display(), "persisting compose snapshot");
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }
        let snapshot = Snapshot {
            project_id: self.project_id.clone(),
            updated_at: Utc::now(),
            document: doc.clone(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }

    fn load(&self) -> Result<Option<ComposeDocument>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        Ok(Some(snapshot.document))
    }
}

/// Picks the store for a project: in memory until the project is created,
/// persisted on disk afterwards.
#[must_use]
pub fn select_store(is_created: bool, data_dir: &Path, project_id: ProjectId) -> Box<dyn DocumentStore> {
    if is_created {
        Box::new(FileStore::new(data_dir, project_id))
    } else {
        Box::new(MemoryStore::new())
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for Box<S> {
    fn persist(&mut self, doc: &ComposeDocument) -> Result<()> {
        (**self).persist(doc)
    }

    fn load(&self) -> Result<Option<ComposeDocument>> {
        (**self).load()
    }
}
