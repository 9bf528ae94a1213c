//! In-memory tree of a parsed compose document.
//!
//! The tree is a thin wrapper around an insertion-ordered YAML value.
//! Only the fields the engine checks get typed accessors; everything else
//! passes through untouched and is serialized back in source order.

use dockpanel_common::types::CollectionKind;
use serde_yaml::{Mapping, Value};

/// Root node of a parsed compose document.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeTree {
    root: Value,
}

impl ComposeTree {
    /// Wraps a parsed YAML value.
    #[must_use]
    pub const fn new(root: Value) -> Self {
        Self { root }
    }

    /// Builds the minimal document with empty `services`, `volumes`,
    /// and `networks` maps.
    #[must_use]
    pub fn empty() -> Self {
        let mut root = Mapping::new();
        for kind in CollectionKind::ALL {
            let _ = root.insert(Value::from(kind.key()), Value::Mapping(Mapping::new()));
        }
        Self::new(Value::Mapping(root))
    }

    /// Returns the underlying YAML value.
    #[must_use]
    pub const fn root(&self) -> &Value {
        &self.root
    }

    /// Consumes the tree and returns the underlying YAML value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.root
    }

    /// Returns the named collection when it is present and a map.
    #[must_use]
    pub fn section(&self, kind: CollectionKind) -> Option<&Mapping> {
        self.root.get(kind.key()).and_then(Value::as_mapping)
    }

    /// Mutable counterpart of [`Self::section`].
    pub fn section_mut(&mut self, kind: CollectionKind) -> Option<&mut Mapping> {
        self.root.get_mut(kind.key()).and_then(Value::as_mapping_mut)
    }

    /// Iterates the entries of a collection as `(name, definition)` pairs,
    /// in source order. Entries with non-string names are skipped.
    pub fn entries(&self, kind: CollectionKind) -> impl Iterator<Item = (&str, &Value)> {
        self.section(kind)
            .into_iter()
            .flat_map(Mapping::iter)
            .filter_map(|(name, value)| name.as_str().map(|n| (n, value)))
    }

    /// Returns the number of entries in a collection (zero when absent).
    #[must_use]
    pub fn count(&self, kind: CollectionKind) -> usize {
        self.section(kind).map_or(0, Mapping::len)
    }

    /// Returns whether a collection contains an entry with this name.
    #[must_use]
    pub fn contains(&self, kind: CollectionKind, name: &str) -> bool {
        self.section(kind).is_some_and(|s| s.contains_key(name))
    }
}

/// Typed view over one service definition.
#[derive(Debug, Clone, Copy)]
pub struct ServiceView<'a> {
    value: &'a Value,
}

impl<'a> ServiceView<'a> {
    /// Wraps a service definition value.
    #[must_use]
    pub const fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// The `image` reference, when declared as a string.
    #[must_use]
    pub fn image(&self) -> Option<&'a str> {
        self.value.get("image").and_then(Value::as_str)
    }

    /// Whether the service declares a `build` section.
    #[must_use]
    pub fn has_build(&self) -> bool {
        self.value.get("build").is_some_and(|b| !b.is_null())
    }

    /// The `env_file` references, normalized to a list.
    #[must_use]
    pub fn env_files(&self) -> Vec<String> {
        string_or_list(self.value.get("env_file"))
    }

    /// Names of the services this one depends on, from either the list
    /// or the map form of `depends_on`.
    #[must_use]
    pub fn depends_on(&self) -> Vec<String> {
        match self.value.get("depends_on") {
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            Some(Value::Mapping(map)) => map
                .keys()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Reads a value that may be a single string or a list of strings.
pub(crate) fn string_or_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}
