//! Package manifest reading
//!
//! Each workspace member directory holds a `package.json` describing the
//! package: its name, declared dependencies, task scripts, and a
//! `switchyard.kind` annotation. The reader fails fast on malformed
//! manifests and duplicate names; everything downstream (graph, selection,
//! scheduling) can then assume a consistent workspace set.
//!
//! The reader is deliberately thin: dependency *versions*, lockfiles and
//! registry resolution are none of switchyard's business. Only names that
//! resolve to other local workspaces ever become graph edges.

use crate::core::config::YardConfig;
use crate::core::error::{ConfigError, YardError, YardResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// What a workspace member is, which determines which task scripts apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkspaceKind {
  /// The repository root package (never built or tested)
  Root,
  /// A deployable application
  App,
  /// A library package
  Package,
  /// A buildable view bundle
  View,
  /// A view compiled as a standalone ES module
  EsmView,
  /// A scaffolding template (not buildable or testable)
  Template,
  /// Plain source with no build or test step of its own
  Source,
}

impl WorkspaceKind {
  /// Whether `build` applies to this kind
  pub fn is_buildable(self) -> bool {
    matches!(
      self,
      WorkspaceKind::App | WorkspaceKind::Package | WorkspaceKind::View | WorkspaceKind::EsmView
    )
  }

  /// Whether `test` applies to this kind
  pub fn is_testable(self) -> bool {
    self.is_buildable()
  }

  /// Whether `lint` applies to this kind
  pub fn is_lintable(self) -> bool {
    !matches!(self, WorkspaceKind::Root)
  }

  pub fn as_str(self) -> &'static str {
    match self {
      WorkspaceKind::Root => "root",
      WorkspaceKind::App => "app",
      WorkspaceKind::Package => "package",
      WorkspaceKind::View => "view",
      WorkspaceKind::EsmView => "esm-view",
      WorkspaceKind::Template => "template",
      WorkspaceKind::Source => "source",
    }
  }
}

impl fmt::Display for WorkspaceKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One local package, immutable for the run.
#[derive(Debug, Clone)]
pub struct Workspace {
  /// Unique name (the workspace's key everywhere in switchyard)
  pub name: String,

  /// Directory relative to the workspace root
  pub location: PathBuf,

  /// What this package is (drives buildable/testable filtering)
  pub kind: WorkspaceKind,

  /// Dependency names exactly as written in the manifest.
  /// May reference packages that are not local workspaces.
  pub declared_dependencies: Vec<String>,

  /// Task scripts declared in the manifest (build/test/lint/...)
  pub scripts: BTreeMap<String, String>,
}

/// The subset of package.json that switchyard reads.
#[derive(Debug, Deserialize)]
struct RawManifest {
  name: String,

  #[serde(default)]
  dependencies: serde_json::Map<String, serde_json::Value>,

  #[serde(default, rename = "devDependencies")]
  dev_dependencies: serde_json::Map<String, serde_json::Value>,

  #[serde(default)]
  scripts: BTreeMap<String, String>,

  #[serde(default)]
  switchyard: Option<ToolSection>,
}

#[derive(Debug, Deserialize)]
struct ToolSection {
  kind: Option<WorkspaceKind>,
}

/// Discover and read all workspace manifests.
///
/// Member directories come from the config's glob patterns, expanded
/// relative to the workspace root. Matches are sorted so discovery order
/// is stable across filesystems. Directories without a package.json are
/// skipped silently (empty scaffolding is common).
pub fn read_workspaces(workspace_root: &Path, config: &YardConfig) -> YardResult<Vec<Workspace>> {
  let mut workspaces = Vec::new();
  let mut seen: HashMap<String, PathBuf> = HashMap::new();

  for pattern in &config.members {
    let full_pattern = workspace_root.join(pattern);
    let full_pattern = full_pattern.to_string_lossy();

    let mut matches: Vec<PathBuf> = glob::glob(&full_pattern)?.filter_map(Result::ok).collect();
    matches.sort();

    for dir in matches {
      if !dir.is_dir() {
        continue;
      }
      let manifest_path = dir.join("package.json");
      if !manifest_path.exists() {
        continue;
      }

      let workspace = read_manifest(workspace_root, &dir, &manifest_path)?;

      if let Some(first) = seen.get(&workspace.name) {
        return Err(YardError::Config(ConfigError::DuplicateWorkspace {
          name: workspace.name,
          first: first.clone(),
          second: manifest_path,
        }));
      }
      seen.insert(workspace.name.clone(), manifest_path);
      workspaces.push(workspace);
    }
  }

  Ok(workspaces)
}

/// Read a single package manifest into a Workspace.
fn read_manifest(workspace_root: &Path, dir: &Path, manifest_path: &Path) -> YardResult<Workspace> {
  let raw = fs::read_to_string(manifest_path)?;
  let manifest: RawManifest = serde_json::from_str(&raw).map_err(|e| {
    YardError::Config(ConfigError::ManifestInvalid {
      path: manifest_path.to_path_buf(),
      reason: e.to_string(),
    })
  })?;

  if manifest.name.trim().is_empty() {
    return Err(YardError::Config(ConfigError::ManifestInvalid {
      path: manifest_path.to_path_buf(),
      reason: "package name must not be empty".to_string(),
    }));
  }

  // Dependencies first, then devDependencies, manifest order preserved.
  let mut declared = Vec::new();
  for name in manifest.dependencies.keys().chain(manifest.dev_dependencies.keys()) {
    if !declared.iter().any(|d| d == name) {
      declared.push(name.clone());
    }
  }

  let kind = manifest
    .switchyard
    .and_then(|s| s.kind)
    .unwrap_or(WorkspaceKind::Package);

  let location = dir.strip_prefix(workspace_root).unwrap_or(dir).to_path_buf();

  Ok(Workspace {
    name: manifest.name,
    location,
    kind,
    declared_dependencies: declared,
    scripts: manifest.scripts,
  })
}
