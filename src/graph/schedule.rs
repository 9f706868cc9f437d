//! Dependency-respecting ordering of a selected workspace set
//!
//! Both modes count only edges *within* the selection: a dependency that
//! was not selected is treated as already satisfied.
//!
//! - **Flat**: Kahn's algorithm over `depends_on`, ties broken by original
//!   selection order. Every selected dependency precedes its selected
//!   dependents.
//! - **Batched**: repeatedly peel the nodes with no remaining dependents
//!   inside the selection as one batch, then reverse the batch list.
//!   Members of one batch have no dependency relationship to each other
//!   and are safe to process concurrently; batch N must fully complete
//!   before batch N+1 starts.
//!
//! Callers run cycle detection first; a cycle reaching the scheduler is a
//! bug, reported as an internal error rather than a panic.

use crate::core::error::{YardError, YardResult};
use crate::graph::WorkspaceGraph;
use std::collections::{HashMap, HashSet};

/// Flat topological order of `selected`, dependencies first.
pub fn flat_order(graph: &WorkspaceGraph, selected: &[String]) -> YardResult<Vec<String>> {
  let in_set: HashSet<&str> = selected.iter().map(String::as_str).collect();

  // Remaining unsatisfied dependencies per node, selection-internal only
  let mut pending: HashMap<&str, usize> = selected
    .iter()
    .map(|name| {
      let deps = graph
        .depends_on(name)
        .into_iter()
        .filter(|d| in_set.contains(d))
        .count();
      (name.as_str(), deps)
    })
    .collect();

  let mut order: Vec<String> = Vec::with_capacity(selected.len());
  let mut emitted: HashSet<&str> = HashSet::new();

  while order.len() < selected.len() {
    // Stable tie-break: scan in original selection order
    let Some(next) = selected
      .iter()
      .map(String::as_str)
      .find(|name| !emitted.contains(name) && pending[name] == 0)
    else {
      return Err(internal_cycle_error(selected, &emitted));
    };

    emitted.insert(next);
    order.push(next.to_string());

    for dependent in graph.dependents(next) {
      if let Some(count) = pending.get_mut(dependent) {
        *count = count.saturating_sub(1);
      }
    }
  }

  Ok(order)
}

/// Parallel-safe batches of `selected`, dependencies in earlier batches.
pub fn batched_order(graph: &WorkspaceGraph, selected: &[String]) -> YardResult<Vec<Vec<String>>> {
  let mut remaining: Vec<&str> = selected.iter().map(String::as_str).collect();
  let mut batches: Vec<Vec<String>> = Vec::new();

  while !remaining.is_empty() {
    let remaining_set: HashSet<&str> = remaining.iter().copied().collect();

    // Peel everything nothing in the selection still depends on
    let (batch, rest): (Vec<&str>, Vec<&str>) = remaining.iter().copied().partition(|name| {
      !graph
        .dependents(name)
        .iter()
        .any(|dependent| remaining_set.contains(dependent))
    });

    if batch.is_empty() {
      let emitted: HashSet<&str> = batches.iter().flatten().map(String::as_str).collect();
      return Err(internal_cycle_error(selected, &emitted));
    }

    batches.push(batch.into_iter().map(str::to_string).collect());
    remaining = rest;
  }

  // Peeling walked consumer-first; build order is dependency-first.
  batches.reverse();
  Ok(batches)
}

fn internal_cycle_error(selected: &[String], emitted: &HashSet<&str>) -> YardError {
  let stuck: Vec<&str> = selected
    .iter()
    .map(String::as_str)
    .filter(|name| !emitted.contains(name))
    .collect();
  YardError::message(format!(
    "Internal error: scheduling reached an unreported dependency cycle among: {}",
    stuck.join(", ")
  ))
}
