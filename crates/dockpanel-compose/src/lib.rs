//! # dockpanel-compose
//!
//! Compose configuration engine for self-hosted project drafts.
//!
//! Handles:
//! - **Parser**: YAML text to an ordered tree and back, plus schema validation.
//! - **Normalizer**: Strict-mode auto-binding of the generated environment file.
//! - **Summary**: Display entries for services, volumes, and networks.
//! - **Remover**: Guarded deletion of a named collection entry.
//! - **Document**: The save/unsaved state machine driving the pipeline.
//! - **Actions**: Action registry dispatched against a persistence store.
//! - **Template**: Built-in starter stacks.
//! - **Graph**: Service startup order derived from `depends_on`.

pub mod actions;
pub mod catalog;
pub mod document;
pub mod error;
pub mod graph;
pub mod normalizer;
pub mod parser;
pub mod remover;
pub mod store;
pub mod summary;
pub mod template;
