//! Dependency cycle detection
//!
//! Depth-first traversal over the whole graph tracking the current path
//! stack. The first node rediscovered while still on the stack yields a
//! concrete witness path (`[n0, …, nk]` with `nk == n0`), not just a
//! "cycle exists" boolean. Only the first cycle in traversal order is
//! reported; callers fix one cycle at a time.
//!
//! BFS selection does not need acyclicity, but the scheduler's topological
//! step does, so build/test/lint run this before producing any ordering.

use crate::core::error::CycleError;
use crate::graph::WorkspaceGraph;
use std::collections::HashSet;

/// Find the first dependency cycle in traversal order, if any.
///
/// Traversal starts from every workspace in discovery order, walking the
/// `depends_on` relation with an explicit stack, so the result is
/// deterministic for a given graph.
pub fn find_cycle(graph: &WorkspaceGraph) -> Option<CycleError> {
  let mut finished: HashSet<&str> = HashSet::new();

  for start in graph.names() {
    if finished.contains(start.as_str()) {
      continue;
    }

    // Frame: (node, its dependencies, index of the next one to visit)
    let mut stack: Vec<(&str, Vec<&str>, usize)> = vec![(start.as_str(), graph.depends_on(start), 0)];
    let mut on_path: Vec<&str> = vec![start.as_str()];
    let mut on_path_set: HashSet<&str> = HashSet::from([start.as_str()]);

    while let Some((node, deps, next)) = stack.last_mut() {
      if let Some(&dep) = deps.get(*next) {
        *next += 1;

        if on_path_set.contains(dep) {
          // Close the loop from dep's first occurrence on the path.
          let pos = on_path.iter().position(|n| *n == dep).unwrap_or(0);
          let mut path: Vec<String> = on_path[pos..].iter().map(|n| n.to_string()).collect();
          path.push(dep.to_string());
          return Some(CycleError { path });
        }

        if !finished.contains(dep) {
          on_path.push(dep);
          on_path_set.insert(dep);
          stack.push((dep, graph.depends_on(dep), 0));
        }
      } else {
        finished.insert(*node);
        on_path_set.remove(*node);
        on_path.pop();
        stack.pop();
      }
    }
  }

  None
}
