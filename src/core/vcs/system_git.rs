//! System git backend - zero dependencies, maximum performance
//!
//! Uses git plumbing commands through a subprocess with an isolated
//! environment. switchyard only needs one thing from version control: the
//! set of files that changed relative to a baseline. With a compare ref
//! that is the merge-base diff (`ref...HEAD`) plus any uncommitted and
//! untracked files; without one it is the working tree against the last
//! commit plus untracked files.

use crate::core::error::{GitError, ResultExt, YardError, YardResult};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Repository working directory
  repo_path: PathBuf,

  /// Working tree root
  work_tree: PathBuf,
}

impl SystemGit {
  /// Open a git repository.
  ///
  /// This performs ONE subprocess call to get the repository metadata.
  pub fn open(path: &Path) -> YardResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(YardError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(YardError::message(format!("Failed to open git repository: {}", stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree: PathBuf::from(work_tree),
    })
  }

  /// Working tree root (git toplevel)
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Files changed relative to a baseline, in git's reporting order,
  /// deduplicated. Paths are relative to the working tree root.
  ///
  /// - `Some(ref)`: committed changes since the merge base (`ref...HEAD`),
  ///   then uncommitted changes, then untracked files.
  /// - `None`: working tree vs. HEAD, then untracked files.
  pub fn changed_files(&self, compare: Option<&str>) -> YardResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    if let Some(base) = compare {
      let range = format!("{}...HEAD", base);
      self.collect_lines(&["diff", "--name-only", &range], &mut files)?;
    }

    // Uncommitted (staged + unstaged) changes
    self.collect_lines(&["diff", "--name-only", "HEAD"], &mut files)?;

    // Untracked files
    self.collect_lines(&["ls-files", "--others", "--exclude-standard"], &mut files)?;

    Ok(files)
  }

  fn collect_lines(&self, args: &[&str], files: &mut Vec<PathBuf>) -> YardResult<()> {
    let output = self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(YardError::Git(GitError::CommandFailed {
        command: format!("git {}", args.join(" ")),
        stderr: stderr.to_string(),
      }));
    }

    for line in String::from_utf8_lossy(&output.stdout).lines() {
      let line = line.trim();
      if line.is_empty() {
        continue;
      }
      let path = PathBuf::from(line);
      if !files.contains(&path) {
        files.push(path);
      }
    }

    Ok(())
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Adds safe configuration overrides
  fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    // Force safe behavior (override user config)
    cmd.arg("-c").arg("protocol.version=2");
    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII

    cmd
  }
}
