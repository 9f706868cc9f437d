//! Selection expansion via multi-source breadth-first search
//!
//! The initial frontier is the user's explicit names (given order) plus
//! the changed set (provider order), deduplicated. `--ancestors` expands
//! along the `dependents` relation (consumers), `--descendants` along
//! `depends_on` (dependencies); both together run two independent passes
//! from the same frontier, ancestors-discovered nodes first.
//!
//! Determinism: the output order is a function of explicit order, changed
//! order and edge insertion order only. Discovery is recorded in a Vec
//! ledger with a membership set on the side; no ordering ever leaks from
//! hash iteration.

use crate::core::error::{SelectionError, YardError, YardResult};
use crate::graph::WorkspaceGraph;
use std::collections::HashSet;

/// Normalized user intent for one selection.
#[derive(Debug, Clone, Default)]
pub struct SelectionRequest {
  /// Names given on the command line, order preserved
  pub explicit: Vec<String>,
  /// Include workspaces changed relative to the compare ref
  pub include_changed: bool,
  /// Ref to diff against; only meaningful with `include_changed`
  pub compare_branch: Option<String>,
  /// Expand to workspaces that depend on the frontier
  pub ancestors: bool,
  /// Expand to workspaces the frontier depends on
  pub descendants: bool,
  /// Request batched (parallel-safe) output
  pub buildable: bool,
}

/// Which adjacency a BFS pass walks.
#[derive(Debug, Clone, Copy)]
enum Relation {
  Dependents,
  DependsOn,
}

/// Expand explicit + changed names into the full selection.
///
/// Explicit names must exist in the graph; changed names are derived from
/// file paths and are trusted. Returns names in deterministic discovery
/// order: frontier first, then ancestors-discovered, then
/// descendants-discovered.
pub fn expand(
  graph: &WorkspaceGraph,
  explicit: &[String],
  changed: &[String],
  ancestors: bool,
  descendants: bool,
) -> YardResult<Vec<String>> {
  for name in explicit {
    if !graph.contains(name) {
      return Err(YardError::Selection(SelectionError::UnknownWorkspace {
        name: name.clone(),
        available: graph.names().to_vec(),
      }));
    }
  }

  let mut result: Vec<String> = Vec::new();
  let mut in_result: HashSet<String> = HashSet::new();
  for name in explicit.iter().chain(changed.iter()) {
    if in_result.insert(name.clone()) {
      result.push(name.clone());
    }
  }

  if !ancestors && !descendants {
    return Ok(result);
  }

  let frontier = result.clone();

  if ancestors {
    for name in bfs(graph, &frontier, Relation::Dependents) {
      if in_result.insert(name.clone()) {
        result.push(name);
      }
    }
  }

  if descendants {
    for name in bfs(graph, &frontier, Relation::DependsOn) {
      if in_result.insert(name.clone()) {
        result.push(name);
      }
    }
  }

  Ok(result)
}

/// Multi-source BFS returning newly discovered nodes (seeds excluded) in
/// level order; within a level, in the order their discovering node was
/// processed.
fn bfs(graph: &WorkspaceGraph, seeds: &[String], relation: Relation) -> Vec<String> {
  let mut seen: HashSet<String> = seeds.iter().cloned().collect();
  let mut level: Vec<String> = seeds.to_vec();
  let mut discovered: Vec<String> = Vec::new();

  while !level.is_empty() {
    let mut next_level: Vec<String> = Vec::new();

    for node in &level {
      let neighbors = match relation {
        Relation::Dependents => graph.dependents(node),
        Relation::DependsOn => graph.depends_on(node),
      };
      for neighbor in neighbors {
        if seen.insert(neighbor.to_string()) {
          discovered.push(neighbor.to_string());
          next_level.push(neighbor.to_string());
        }
      }
    }

    level = next_level;
  }

  discovered
}
