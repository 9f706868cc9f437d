//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A test workspace with git history
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create a new test workspace. The configured runner is `true`, so
  /// every package script succeeds without needing a package manager.
  pub fn new() -> Result<Self> {
    Self::with_runner("true")
  }

  /// Create a workspace whose script runner is the given command
  /// (`false` makes every script fail, which is handy for driver tests).
  pub fn with_runner(runner: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    std::fs::write(
      path.join("switchyard.toml"),
      format!(
        r#"members = ["packages/*"]
runner = "{}"
"#,
        runner
      ),
    )?;

    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial workspace setup"])?;

    Ok(Self { _root: root, path })
  }

  /// Add a `package`-kind workspace with build/test/lint scripts.
  pub fn add_package(&self, name: &str, deps: &[&str]) -> Result<PathBuf> {
    self.add_workspace(name, deps, "package", &["build", "test", "lint"])
  }

  /// Add a workspace with full control over kind and declared scripts.
  pub fn add_workspace(&self, name: &str, deps: &[&str], kind: &str, scripts: &[&str]) -> Result<PathBuf> {
    let package_path = self.path.join("packages").join(name);
    std::fs::create_dir_all(package_path.join("src"))?;

    let deps_json = deps
      .iter()
      .map(|d| format!(r#""{}": "*""#, d))
      .collect::<Vec<_>>()
      .join(", ");
    let scripts_json = scripts
      .iter()
      .map(|s| format!(r#""{}": "noop""#, s))
      .collect::<Vec<_>>()
      .join(", ");

    std::fs::write(
      package_path.join("package.json"),
      format!(
        r#"{{
  "name": "{}",
  "dependencies": {{ {} }},
  "scripts": {{ {} }},
  "switchyard": {{ "kind": "{}" }}
}}
"#,
        name, deps_json, scripts_json, kind
      ),
    )?;

    std::fs::write(package_path.join("src/index.ts"), format!("// {}\n", name))?;

    Ok(package_path)
  }

  /// Commit current changes
  pub fn commit(&self, message: &str) -> Result<()> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;
    Ok(())
  }

  /// Modify a file in a package
  pub fn modify_file(&self, package: &str, file: &str, content: &str) -> Result<()> {
    let file_path = self.path.join("packages").join(package).join(file);
    std::fs::write(file_path, content)?;
    Ok(())
  }
}

/// Run a git command in the given directory
pub fn git(path: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .arg("-C")
    .arg(path)
    .args(args)
    .output()
    .context("Failed to run git")?;

  if !output.status.success() {
    anyhow::bail!(
      "git {} failed: {}",
      args.join(" "),
      String::from_utf8_lossy(&output.stderr)
    );
  }

  Ok(output)
}

/// Run switchyard and fail the test if it exits non-zero
pub fn run_switchyard(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_switchyard_raw(cwd, args)?;

  if !output.status.success() {
    anyhow::bail!(
      "switchyard {} failed\nstdout: {}\nstderr: {}",
      args.join(" "),
      String::from_utf8_lossy(&output.stdout),
      String::from_utf8_lossy(&output.stderr)
    );
  }

  Ok(output)
}

/// Run switchyard and hand back the raw output, whatever the exit code
pub fn run_switchyard_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_switchyard");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run switchyard")
}

/// Parse stdout as JSON
pub fn json_stdout(output: &Output) -> Result<serde_json::Value> {
  let stdout = String::from_utf8_lossy(&output.stdout);
  serde_json::from_str(stdout.trim()).with_context(|| format!("stdout is not JSON: {}", stdout))
}
