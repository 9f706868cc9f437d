//! Unified workspace context - build once, pass everywhere
//!
//! WorkspaceContext eliminates redundant manifest/config/graph loads by
//! building all workspace-level data once in main.rs, then passing by
//! reference to all commands. Nothing here is cached between process
//! invocations; every run recomputes the graph from the manifests on
//! disk, so there is no hidden cross-run state.

use crate::core::config::{self, YardConfig};
use crate::core::error::YardResult;
use crate::graph::WorkspaceGraph;
use crate::manifest;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Unified workspace context containing all shared workspace-level data.
///
/// Built once at startup, passed by reference to all commands.
#[derive(Clone)]
pub struct WorkspaceContext {
  /// Workspace root directory (absolute path)
  pub root: PathBuf,

  /// Dependency graph (built from the manifest set)
  /// Wrapped in Arc for cheap sharing across the driver's worker threads
  pub graph: Arc<WorkspaceGraph>,

  /// switchyard.toml configuration (defaults when absent)
  pub config: Arc<YardConfig>,
}

impl WorkspaceContext {
  /// Build workspace context starting from an invocation directory.
  ///
  /// Finds the workspace root, loads config, reads all member manifests
  /// and builds the dependency graph. Fails fast on malformed manifests
  /// or duplicate workspace names.
  pub fn build(start_dir: &Path) -> YardResult<Self> {
    let root = config::find_workspace_root(start_dir);
    let config = YardConfig::load_or_default(&root)?;
    let workspaces = manifest::read_workspaces(&root, &config)?;
    let graph = Arc::new(WorkspaceGraph::build(workspaces));

    Ok(Self {
      root,
      graph,
      config: Arc::new(config),
    })
  }

  /// Get workspace root as Path reference (convenience)
  pub fn workspace_root(&self) -> &Path {
    &self.root
  }
}
