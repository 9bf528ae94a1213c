//! Guarded removal of named collection entries.

use dockpanel_common::constants::LAST_SERVICE_REASON;
use dockpanel_common::types::CollectionKind;

use crate::error::{ComposeError, Result};
use crate::parser::ast::ComposeTree;

/// Result of a removal request.
#[derive(Debug, Clone, PartialEq)]
pub enum Removal {
    /// The entry did not exist; nothing changed.
    Unchanged,
    /// The entry was deleted; the remaining keys keep their order.
    Removed(ComposeTree),
}

/// Checks whether removing `name` from `kind` is allowed, given how many
/// entries the collection currently holds.
///
/// # Errors
///
/// Returns [`ComposeError::Rejected`] when the removal would leave the
/// document without services.
pub fn guard(kind: CollectionKind, present: bool, count: usize) -> Result<()> {
    if present && kind == CollectionKind::Services && count <= 1 {
        return Err(ComposeError::rejected(LAST_SERVICE_REASON));
    }
    Ok(())
}

/// Removes the entry `name` from the `kind` collection of `tree`.
///
/// A missing entry is not an error. The input tree is never modified;
/// on success a new tree is returned.
///
/// # Errors
///
/// Returns [`ComposeError::Rejected`] when `name` is the last service.
pub fn remove(tree: &ComposeTree, kind: CollectionKind, name: &str) -> Result<Removal> {
    let present = tree.contains(kind, name);
    guard(kind, present, tree.count(kind))?;
    if !present {
        tracing::debug!(%kind, name, "nothing to remove");
        return Ok(Removal::Unchanged);
    }

    let mut next = tree.clone();
    if let Some(section) = next.section_mut(kind) {
        let _ = section.shift_remove(name);
    }
    tracing::debug!(%kind, name, "removed entry");
    Ok(Removal::Removed(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    const STACK: &str = "\
services:
  web:
    image: nginx
  api:
    image: api
  db:
    image: postgres
volumes:
  one: null
  two: null
  three: null
";

    fn names(tree: &ComposeTree, kind: CollectionKind) -> Vec<String> {
        tree.entries(kind).map(|(n, _)| n.to_owned()).collect()
    }

    #[test]
    fn removes_service_and_keeps_order() {
        let tree = parse(STACK).expect("parse");
        let Removal::Removed(next) = remove(&tree, CollectionKind::Services, "web").expect("ok")
        else {
            unreachable!("web exists");
        };
        assert_eq!(names(&next, CollectionKind::Services), vec!["api", "db"]);
        assert_eq!(tree.count(CollectionKind::Services), 3);
    }

    #[test]
    fn removing_middle_volume_keeps_neighbours_in_place() {
        let tree = parse(STACK).expect("parse");
        let outcome = remove(&tree, CollectionKind::Volumes, "two").expect("ok");
        let Removal::Removed(next) = outcome else {
            unreachable!("two exists");
        };
        assert_eq!(names(&next, CollectionKind::Volumes), vec!["one", "three"]);
    }

    #[test]
    fn missing_name_is_unchanged() {
        let tree = parse(STACK).expect("parse");
        assert_eq!(
            remove(&tree, CollectionKind::Networks, "ghost").expect("ok"),
            Removal::Unchanged
        );
    }

    #[test]
    fn last_service_is_rejected() {
        let tree = parse("services:\n  web:\n    image: nginx\n").expect("parse");
        let err = remove(&tree, CollectionKind::Services, "web").unwrap_err();
        assert_eq!(err.to_string(), "at least one service required");
        assert_eq!(tree.count(CollectionKind::Services), 1);
    }

    #[test]
    fn last_volume_can_be_removed() {
        let tree = parse("services:\n  web: {image: x}\nvolumes:\n  data: null\n").expect("parse");
        let outcome = remove(&tree, CollectionKind::Volumes, "data").expect("ok");
        assert!(matches!(outcome, Removal::Removed(ref t) if t.count(CollectionKind::Volumes) == 0));
    }

    #[test]
    fn guard_ignores_absent_services() {
        assert!(guard(CollectionKind::Services, false, 1).is_ok());
        assert!(guard(CollectionKind::Services, true, 1).is_err());
        assert!(guard(CollectionKind::Services, true, 2).is_ok());
    }
}
