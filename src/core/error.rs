//! Error types for switchyard with contextual messages and exit codes
//!
//! Every error is categorized so the process exit code reflects what went
//! wrong: user mistakes (bad flags, unknown workspaces), system failures
//! (git, I/O) and validation failures (cycles, failed task scripts).

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for switchyard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, unknown workspace names)
  User = 1,
  /// System error (git, I/O)
  System = 2,
  /// Validation failure (dependency cycles, failed task scripts)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for switchyard
#[derive(Debug)]
pub enum YardError {
  /// Configuration and usage errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// Dependency cycle detected in the workspace graph
  Cycle(CycleError),

  /// Selection errors (unknown workspace names)
  Selection(SelectionError),

  /// Task driver failures (a package's build/test/lint script failed)
  Driver(DriverError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl YardError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    YardError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      YardError::Message { message, context, help } => YardError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      YardError::Config(_) => ExitCode::User,
      YardError::Selection(_) => ExitCode::User,
      YardError::Git(_) => ExitCode::System,
      YardError::Io(_) => ExitCode::System,
      YardError::Cycle(_) => ExitCode::Validation,
      YardError::Driver(_) => ExitCode::Validation,
      YardError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      YardError::Config(e) => e.help_message(),
      YardError::Git(e) => e.help_message(),
      YardError::Cycle(e) => e.help_message(),
      YardError::Selection(e) => e.help_message(),
      YardError::Driver(_) => None,
      YardError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for YardError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      YardError::Config(e) => write!(f, "{}", e),
      YardError::Git(e) => write!(f, "{}", e),
      YardError::Cycle(e) => write!(f, "{}", e),
      YardError::Selection(e) => write!(f, "{}", e),
      YardError::Driver(e) => write!(f, "{}", e),
      YardError::Io(e) => write!(f, "I/O error: {}", e),
      YardError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for YardError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      YardError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for YardError {
  fn from(err: io::Error) -> Self {
    YardError::Io(err)
  }
}

impl From<String> for YardError {
  fn from(msg: String) -> Self {
    YardError::message(msg)
  }
}

impl From<&str> for YardError {
  fn from(msg: &str) -> Self {
    YardError::message(msg)
  }
}

impl From<serde_json::Error> for YardError {
  fn from(err: serde_json::Error) -> Self {
    YardError::message(format!("JSON error: {}", err))
  }
}

impl From<toml_edit::TomlError> for YardError {
  fn from(err: toml_edit::TomlError) -> Self {
    YardError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for YardError {
  fn from(err: toml_edit::de::Error) -> Self {
    YardError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<glob::PatternError> for YardError {
  fn from(err: glob::PatternError) -> Self {
    YardError::Config(ConfigError::BadMemberPattern {
      reason: err.to_string(),
    })
  }
}

impl From<std::string::FromUtf8Error> for YardError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    YardError::message(format!("UTF-8 conversion error: {}", err))
  }
}

/// Convert anyhow::Error to YardError (used at integration seams)
impl From<anyhow::Error> for YardError {
  fn from(err: anyhow::Error) -> Self {
    YardError::message(err.to_string())
  }
}

/// Configuration and usage errors
#[derive(Debug)]
pub enum ConfigError {
  /// switchyard.toml exists but cannot be parsed
  Malformed { path: PathBuf, reason: String },

  /// A workspace member glob is not a valid pattern
  BadMemberPattern { reason: String },

  /// A package manifest is malformed or missing required fields
  ManifestInvalid { path: PathBuf, reason: String },

  /// Two workspace members declare the same name
  DuplicateWorkspace {
    name: String,
    first: PathBuf,
    second: PathBuf,
  },

  /// --compare-branch given without --changed
  CompareBranchWithoutChanged,
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::CompareBranchWithoutChanged => {
        Some("Pass --changed to select workspaces that differ from the compare branch.".to_string())
      }
      ConfigError::DuplicateWorkspace { name, .. } => Some(format!(
        "Rename one of the packages so that '{}' is unique within the workspace.",
        name
      )),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Malformed { path, reason } => {
        write!(f, "Invalid configuration at {}: {}", path.display(), reason)
      }
      ConfigError::BadMemberPattern { reason } => {
        write!(f, "Invalid workspace member pattern: {}", reason)
      }
      ConfigError::ManifestInvalid { path, reason } => {
        write!(f, "Invalid package manifest at {}: {}", path.display(), reason)
      }
      ConfigError::DuplicateWorkspace { name, first, second } => {
        write!(
          f,
          "Duplicate workspace name '{}' declared by both {} and {}",
          name,
          first.display(),
          second.display()
        )
      }
      ConfigError::CompareBranchWithoutChanged => {
        write!(f, "--compare-branch requires --changed")
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "--changed requires a git repository. Initialize one or check the path: {}",
        path.display()
      )),
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
    }
  }
}

/// A concrete dependency cycle witness.
///
/// The path always closes on itself: the last name equals the first.
#[derive(Debug, Clone)]
pub struct CycleError {
  pub path: Vec<String>,
}

impl CycleError {
  fn help_message(&self) -> Option<String> {
    Some(
      "Break the cycle by removing one of the dependencies, or re-run build/test/lint \
       with --dangerously-ignore-circular-dependencies to exclude the requested package \
       from cycle analysis."
        .to_string(),
    )
  }
}

impl fmt::Display for CycleError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Dependency cycle detected: {}", self.path.join(" -> "))
  }
}

/// Selection errors
#[derive(Debug)]
pub enum SelectionError {
  /// An explicitly requested workspace does not exist in the graph
  UnknownWorkspace { name: String, available: Vec<String> },
}

impl SelectionError {
  fn help_message(&self) -> Option<String> {
    match self {
      SelectionError::UnknownWorkspace { available, .. } => {
        if available.is_empty() {
          Some("No workspaces were discovered. Check the `members` patterns in switchyard.toml.".to_string())
        } else {
          Some(format!("Known workspaces: {}", available.join(", ")))
        }
      }
    }
  }
}

impl fmt::Display for SelectionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SelectionError::UnknownWorkspace { name, .. } => {
        write!(f, "Unknown workspace '{}'", name)
      }
    }
  }
}

/// Task driver failures
#[derive(Debug)]
pub struct DriverError {
  /// Script that was being driven (build/test/lint)
  pub script: String,

  /// Packages whose script failed
  pub failed: Vec<String>,
}

impl fmt::Display for DriverError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} failed for {} package(s): {}",
      self.script,
      self.failed.len(),
      self.failed.join(", ")
    )
  }
}

/// Result type alias for switchyard
pub type YardResult<T> = Result<T, YardError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> YardResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> YardResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<YardError>,
{
  fn context(self, ctx: impl Into<String>) -> YardResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> YardResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &YardError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
