//! Workspace dependency graph built on petgraph
//!
//! ## Graph Structure
//!
//! - **Directed graph**: `A → B` means "A depends on B"
//! - **Nodes**: local workspace packages only
//! - **Edges**: declared dependencies that resolve to another local
//!   workspace; anything else (registry packages, typos) is dropped here
//!   because external versions are a manifest concern, not a scheduling one
//!
//! The graph is an immutable snapshot: nodes and edges are added once in
//! manifest order and never mutated afterwards. The reverse relation
//! (`dependents`) is the exact transpose of `depends_on` by construction,
//! since both read the same edge set. Subgraphs used for cycle-override
//! recovery are new values built by [`WorkspaceGraph::without`], never
//! in-place edits.
//!
//! ## Determinism
//!
//! Every neighbor accessor returns names in edge insertion order, which
//! follows manifest discovery order. petgraph iterates adjacency
//! most-recently-added first, so accessors collect and reverse; no result
//! ever depends on hash-map iteration order.

use crate::manifest::Workspace;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Workspace dependency graph snapshot.
pub struct WorkspaceGraph {
  /// The dependency graph; edge A → B means A depends on B
  graph: DiGraph<Workspace, ()>,

  /// Index: workspace name → node index
  name_to_node: HashMap<String, NodeIndex>,

  /// Workspace names in discovery order
  names: Vec<String>,
}

impl WorkspaceGraph {
  /// Build the graph from the manifest set.
  ///
  /// Pure function of its input: nodes in the given order, then one edge
  /// per declared dependency that names another local workspace.
  /// Self-references are ignored.
  pub fn build(workspaces: Vec<Workspace>) -> Self {
    let mut graph = DiGraph::new();
    let mut name_to_node = HashMap::new();
    let mut names = Vec::with_capacity(workspaces.len());

    for workspace in workspaces {
      let name = workspace.name.clone();
      let idx = graph.add_node(workspace);
      name_to_node.insert(name.clone(), idx);
      names.push(name);
    }

    for name in &names {
      let from = name_to_node[name];
      let declared = graph[from].declared_dependencies.clone();
      for dep in &declared {
        if dep == name {
          continue;
        }
        if let Some(&to) = name_to_node.get(dep) {
          graph.add_edge(from, to, ());
        }
      }
    }

    Self {
      graph,
      name_to_node,
      names,
    }
  }

  /// All workspace names in discovery order.
  pub fn names(&self) -> &[String] {
    &self.names
  }

  pub fn contains(&self, name: &str) -> bool {
    self.name_to_node.contains_key(name)
  }

  pub fn get(&self, name: &str) -> Option<&Workspace> {
    self.name_to_node.get(name).map(|&idx| &self.graph[idx])
  }

  /// Direct local dependencies of a workspace, in manifest order.
  /// Unknown names yield an empty list.
  pub fn depends_on(&self, name: &str) -> Vec<&str> {
    self.neighbors(name, Direction::Outgoing)
  }

  /// Direct dependents of a workspace (the transpose relation), in the
  /// order the depending packages were discovered.
  pub fn dependents(&self, name: &str) -> Vec<&str> {
    self.neighbors(name, Direction::Incoming)
  }

  fn neighbors(&self, name: &str, dir: Direction) -> Vec<&str> {
    let Some(&idx) = self.name_to_node.get(name) else {
      return Vec::new();
    };

    // petgraph walks adjacency newest-first; reverse for insertion order.
    let mut neighbors: Vec<&str> = self
      .graph
      .neighbors_directed(idx, dir)
      .map(|n| self.graph[n].name.as_str())
      .collect();
    neighbors.reverse();
    neighbors
  }

  /// A new graph with the given workspaces (and their incident edges)
  /// removed. The original graph is untouched.
  pub fn without(&self, removed: &[&str]) -> WorkspaceGraph {
    let remaining: Vec<Workspace> = self
      .names
      .iter()
      .filter(|name| !removed.contains(&name.as_str()))
      .map(|name| self.graph[self.name_to_node[name]].clone())
      .collect();

    // build() re-resolves declared dependencies against the reduced node
    // set, so edges touching a removed workspace disappear with it.
    WorkspaceGraph::build(remaining)
  }
}
