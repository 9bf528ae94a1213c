//! Service startup order using `petgraph`.
//!
//! Builds a directed graph from `depends_on` declarations and resolves a
//! topological order so dependencies come before their dependents.

use std::collections::HashMap;

use dockpanel_common::types::CollectionKind;
use petgraph::graph::NodeIndex;

use crate::error::{ComposeError, Result};
use crate::parser::ast::{ComposeTree, ServiceView};

/// A dependency graph of services.
#[derive(Debug)]
pub struct DependencyGraph {
    graph: petgraph::Graph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Creates an empty dependency graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: petgraph::Graph::new(),
            nodes: HashMap::new(),
        }
    }

    /// Builds the graph of every service in `tree`.
    ///
    /// Dependencies on services the document does not declare are ignored.
    #[must_use]
    pub fn from_tree(tree: &ComposeTree) -> Self {
        let mut graph = Self::new();
        for (name, _) in tree.entries(CollectionKind::Services) {
            let _ = graph.add_service(name);
        }
        for (name, definition) in tree.entries(CollectionKind::Services) {
            for dependency in ServiceView::new(definition).depends_on() {
                graph.add_dependency(name, &dependency);
            }
        }
        graph
    }

    /// Adds a service node, returning the existing node for a known name.
    pub fn add_service(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.nodes.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_owned());
        let _ = self.nodes.insert(name.to_owned(), idx);
        idx
    }

    /// Records that `dependent` must start after `dependency`.
    ///
    /// Unknown names are ignored.
    pub fn add_dependency(&mut self, dependent: &str, dependency: &str) {
        if let (Some(&from), Some(&to)) = (self.nodes.get(dependency), self.nodes.get(dependent)) {
            let _ = self.graph.add_edge(from, to, ());
        }
    }

    /// Returns services in startup order.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::DependencyCycle`] if the graph has a cycle.
    pub fn resolve_order(&self) -> Result<Vec<String>> {
        match petgraph::algo::toposort(&self.graph, None) {
            Ok(indices) => Ok(indices
                .iter()
                .filter_map(|&idx| self.graph.node_weight(idx).cloned())
                .collect()),
            Err(cycle) => Err(ComposeError::DependencyCycle {
                service: self
                    .graph
                    .node_weight(cycle.node_id())
                    .cloned()
                    .unwrap_or_default(),
            }),
        }
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the services of `tree` in startup order.
///
/// # Errors
///
/// Returns [`ComposeError::DependencyCycle`] if `depends_on` forms a cycle.
pub fn startup_order(tree: &ComposeTree) -> Result<Vec<String>> {
    DependencyGraph::from_tree(tree).resolve_order()
}
