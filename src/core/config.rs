//! Workspace configuration (switchyard.toml)
//!
//! The config file is optional: a workspace without one gets the defaults
//! (members under `packages/*`, npm as the script runner). The workspace
//! root is located by walking up from the invocation directory until a
//! switchyard.toml is found.

use crate::core::error::{ConfigError, YardError, YardResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for switchyard, loaded from `<root>/switchyard.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YardConfig {
  /// Glob patterns (relative to the workspace root) naming member directories
  #[serde(default = "default_members")]
  pub members: Vec<String>,

  /// Default git ref for `--changed` when no `--compare-branch` is given.
  /// None means "working tree vs. last commit".
  #[serde(default, rename = "compare-branch")]
  pub compare_branch: Option<String>,

  /// Command used to run package scripts (`<runner> run <script>`)
  #[serde(default = "default_runner")]
  pub runner: String,

  /// Maximum number of packages driven concurrently within one batch.
  /// None lets rayon pick based on available parallelism.
  #[serde(default)]
  pub jobs: Option<usize>,
}

fn default_members() -> Vec<String> {
  vec!["packages/*".to_string()]
}

fn default_runner() -> String {
  "npm".to_string()
}

impl Default for YardConfig {
  fn default() -> Self {
    Self {
      members: default_members(),
      compare_branch: None,
      runner: default_runner(),
      jobs: None,
    }
  }
}

impl YardConfig {
  /// Load configuration from a workspace root, falling back to defaults
  /// when no switchyard.toml exists. A file that exists but does not parse
  /// is a hard error, not a silent fallback.
  pub fn load_or_default(workspace_root: &Path) -> YardResult<Self> {
    let path = workspace_root.join("switchyard.toml");
    if !path.exists() {
      return Ok(Self::default());
    }

    let raw = fs::read_to_string(&path)?;
    toml_edit::de::from_str(&raw).map_err(|e| {
      YardError::Config(ConfigError::Malformed {
        path,
        reason: e.to_string(),
      })
    })
  }
}

/// Locate the workspace root by walking up from `start` until a
/// switchyard.toml is found. Falls back to `start` itself so commands
/// still work in config-less workspaces.
pub fn find_workspace_root(start: &Path) -> PathBuf {
  let mut current = start;
  loop {
    if current.join("switchyard.toml").exists() {
      return current.to_path_buf();
    }
    match current.parent() {
      Some(parent) => current = parent,
      None => return start.to_path_buf(),
    }
  }
}
