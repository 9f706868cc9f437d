//! Changed workspace analysis
//!
//! Maps the git change provider's file list onto owning workspaces by
//! location prefix. Git reports paths relative to the repository
//! toplevel; workspace locations are relative to the workspace root, so
//! both sides are resolved to absolute paths before matching. The longest
//! matching location wins, which keeps nested member directories correct.
//!
//! Order matters: the result preserves the provider's file order
//! (first file owned by a workspace determines its position), so the
//! selection engine's determinism invariant extends through `--changed`.

use crate::core::error::YardResult;
use crate::core::vcs::SystemGit;
use crate::graph::WorkspaceGraph;
use std::path::{Path, PathBuf};

/// Workspaces owning any of the given changed files, in first-file order.
pub fn changed_workspaces(graph: &WorkspaceGraph, workspace_root: &Path, files: &[PathBuf]) -> Vec<String> {
  // (absolute location, name), discovery order
  let locations: Vec<(PathBuf, &str)> = graph
    .names()
    .iter()
    .filter_map(|name| {
      let ws = graph.get(name)?;
      Some((workspace_root.join(&ws.location), name.as_str()))
    })
    .collect();

  let mut changed: Vec<String> = Vec::new();
  for file in files {
    let absolute = workspace_root.join(file);
    let Some(owner) = owning_workspace(&locations, &absolute) else {
      continue;
    };
    if !changed.iter().any(|c| c == owner) {
      changed.push(owner.to_string());
    }
  }

  changed
}

fn owning_workspace<'a>(locations: &[(PathBuf, &'a str)], file: &Path) -> Option<&'a str> {
  locations
    .iter()
    .filter(|(location, _)| file.starts_with(location))
    .max_by_key(|(location, _)| location.components().count())
    .map(|(_, name)| *name)
}

/// Fetch the changed file set from git and map it to workspace names.
///
/// Git reports paths relative to its toplevel, which is not necessarily
/// the workspace root (the workspace may live inside a larger repo), so
/// files are made absolute against the toplevel before matching.
pub fn changed_since(
  graph: &WorkspaceGraph,
  workspace_root: &Path,
  git: &SystemGit,
  compare: Option<&str>,
) -> YardResult<Vec<String>> {
  let files: Vec<PathBuf> = git
    .changed_files(compare)?
    .into_iter()
    .map(|f| git.work_tree().join(f))
    .collect();
  Ok(changed_workspaces(graph, workspace_root, &files))
}
