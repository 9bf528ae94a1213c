//! End-to-end tests for the compose engine.
//!
//! These tests drive documents through the public action surface:
//! 1. Parse and summarize a lax document
//! 2. Strict-mode binding and its fixed point
//! 3. Guarded removal of the last service
//! 4. Malformed text with a previously saved summary
//! 5. Template loading
//! 6. Persistence through the file-backed store

#![allow(clippy::expect_used, clippy::unwrap_used)]

use dockpanel_common::types::{CollectionKind, ProjectId};
use dockpanel_compose::actions::{ActionDispatcher, ComposeAction};
use dockpanel_compose::document::{ComposeDocument, ComposeEngine, DocumentState};
use dockpanel_compose::error::ComposeError;
use dockpanel_compose::normalizer::{self, NormalizeOptions};
use dockpanel_compose::parser;
use dockpanel_compose::store::{DocumentStore, FileStore, MemoryStore};
use dockpanel_compose::summary::{ServiceEntry, VolumeEntry};
use dockpanel_compose::template::Template;

const NO_VARS: &[&str] = &[];
const THREE_VARS: &[&str] = &["DB_HOST", "DB_USER", "DB_PASS"];

fn dispatcher() -> ActionDispatcher<MemoryStore> {
    ActionDispatcher::new(ComposeEngine::default(), MemoryStore::new())
}

// ── Scenarios ────────────────────────────────────────────────────────

#[test]
fn lax_single_service_summary() {
    let mut doc = ComposeDocument::new(false);
    let mut dispatcher = dispatcher();
    dispatcher
        .dispatch(
            &mut doc,
            NO_VARS,
            ComposeAction::Edit(r#"services: {web: {image: "nginx:latest"}}"#.into()),
        )
        .expect("edit");
    dispatcher
        .dispatch(&mut doc, NO_VARS, ComposeAction::Save)
        .expect("save");

    assert!(doc.is_saved());
    assert_eq!(
        doc.summary().services,
        vec![ServiceEntry {
            name: "web".into(),
            image: "nginx:latest".into(),
            env_files: Vec::new(),
        }]
    );
    assert!(doc.summary().volumes.is_empty());
    assert!(doc.summary().networks.is_empty());
}

#[test]
fn strict_save_binds_every_service_and_is_stable() {
    let text = "\
services:
  web:
    image: nginx:latest
    ports:
      - \"80:80\"
  db:
    image: postgres:15
volumes:
  db_data: null
";
    let mut doc = ComposeDocument::new(false);
    let mut dispatcher = dispatcher();
    dispatcher
        .dispatch(&mut doc, THREE_VARS, ComposeAction::Edit(text.into()))
        .expect("edit");
    dispatcher
        .dispatch(&mut doc, THREE_VARS, ComposeAction::ToggleStrict)
        .expect("toggle");
    assert!(!doc.is_saved());

    dispatcher
        .dispatch(&mut doc, THREE_VARS, ComposeAction::Save)
        .expect("first save");
    for service in &doc.summary().services {
        assert_eq!(service.env_files, vec![".env"], "{}", service.name);
    }
    assert_eq!(
        doc.summary().volumes,
        vec![VolumeEntry {
            name: "db_data".into(),
            driver: "local".into(),
        }]
    );

    let first = doc.raw_text().to_owned();
    dispatcher
        .dispatch(&mut doc, THREE_VARS, ComposeAction::Save)
        .expect("second save");
    assert_eq!(doc.raw_text(), first);
}

#[test]
fn removing_the_only_service_is_rejected() {
    let mut doc = ComposeDocument::new(true);
    let mut dispatcher = dispatcher();
    dispatcher
        .dispatch(
            &mut doc,
            NO_VARS,
            ComposeAction::Import("services:\n  web:\n    image: nginx\n".into()),
        )
        .expect("import");
    let before = doc.clone();

    let err = dispatcher
        .dispatch(
            &mut doc,
            NO_VARS,
            ComposeAction::Remove {
                kind: CollectionKind::Services,
                name: "web".into(),
            },
        )
        .unwrap_err();

    assert!(matches!(err, ComposeError::Rejected { ref reason } if reason == "at least one service required"));
    assert_eq!(doc, before);
}

#[test]
fn malformed_paste_keeps_saved_summary() {
    let mut doc = ComposeDocument::new(true);
    let mut dispatcher = dispatcher();
    dispatcher
        .dispatch(&mut doc, NO_VARS, ComposeAction::LoadTemplate(Template::DataScience))
        .expect("template");
    let committed = doc.summary().clone();

    dispatcher
        .dispatch(
            &mut doc,
            NO_VARS,
            ComposeAction::Edit("services:\n  web:\n    image: nginx\n      ports: [80]\n".into()),
        )
        .expect("edit");
    let err = dispatcher
        .dispatch(&mut doc, NO_VARS, ComposeAction::Save)
        .unwrap_err();

    assert!(matches!(err, ComposeError::MalformedDocument { .. }));
    assert!(!err.messages().is_empty());
    assert_eq!(doc.state(), DocumentState::Editing);
    assert_eq!(doc.summary(), &committed);
}

#[test]
fn minimal_template_is_saved_immediately() {
    let mut doc = ComposeDocument::new(true);
    dispatcher()
        .dispatch(&mut doc, NO_VARS, ComposeAction::LoadTemplate(Template::Minimal))
        .expect("template");

    assert!(doc.is_saved());
    assert_eq!(doc.summary().services.len(), 1);
    assert_eq!(doc.summary().volumes.len(), 1);
    assert_eq!(doc.summary().networks.len(), 1);
}

// ── Properties ───────────────────────────────────────────────────────

#[test]
fn fail_closed_on_empty_and_malformed_text() {
    let engine = ComposeEngine::default();
    assert!(matches!(
        engine.process("", true, NO_VARS),
        Err(ComposeError::EmptyDocument)
    ));
    assert!(matches!(
        engine.process("not: [valid", false, NO_VARS),
        Err(ComposeError::MalformedDocument { .. })
    ));
}

#[test]
fn normalization_fixed_point_across_templates() {
    for template in Template::ALL {
        let mut tree = parser::parse(template.source()).expect("parse");
        let options = NormalizeOptions {
            strict: true,
            variable_count: 2,
            env_file: ".env",
        };
        let _ = normalizer::normalize(&mut tree, options);
        let once = parser::serialize(&tree).expect("serialize");

        let mut again = parser::parse(&once).expect("reparse");
        assert_eq!(normalizer::normalize(&mut again, options), 0, "{template}");
        assert_eq!(parser::serialize(&again).expect("serialize"), once, "{template}");
    }
}

#[test]
fn removal_shrinks_services_by_one() {
    let mut doc = ComposeDocument::new(true);
    let mut dispatcher = dispatcher();
    dispatcher
        .dispatch(&mut doc, THREE_VARS, ComposeAction::LoadTemplate(Template::WebApp))
        .expect("template");
    let before = doc.summary().services.len();

    dispatcher
        .dispatch(
            &mut doc,
            THREE_VARS,
            ComposeAction::Remove {
                kind: CollectionKind::Services,
                name: "node".into(),
            },
        )
        .expect("remove");

    let names: Vec<&str> = doc.summary().services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(doc.summary().services.len(), before - 1);
    assert_eq!(names, vec!["apache", "mysql", "phpmyadmin", "traefik"]);
    assert!(doc.is_saved());
}

#[test]
fn saved_summary_matches_raw_text() {
    let mut doc = ComposeDocument::new(true);
    let engine = ComposeEngine::default();
    engine
        .load_template(&mut doc, Template::WebApp, THREE_VARS)
        .expect("template");
    let reparsed = engine
        .process(doc.raw_text(), true, THREE_VARS)
        .expect("reprocess");
    assert_eq!(&reparsed.summary, doc.summary());
    assert_eq!(reparsed.raw_text, doc.raw_text());
}

// ── Persistence ──────────────────────────────────────────────────────

#[test]
fn file_store_reloads_committed_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileStore::new(dir.path(), ProjectId::new("project-1"));
    let mut dispatcher = ActionDispatcher::new(ComposeEngine::default(), store);
    let mut doc = ComposeDocument::new(true);

    dispatcher
        .dispatch(&mut doc, THREE_VARS, ComposeAction::LoadTemplate(Template::Minimal))
        .expect("template");

    let reloaded = dispatcher.store().load().expect("load").expect("snapshot");
    assert_eq!(reloaded, doc);
}
