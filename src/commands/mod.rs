//! CLI commands for switchyard
//!
//! - **select**: print the expanded selection as JSON (flat or batched)
//! - **build/test/lint**: select, schedule in batches, drive each
//!   package's script in dependency order
//!
//! All commands accept `&WorkspaceContext` to avoid redundant workspace
//! loads; selection plumbing shared between them lives here.

pub mod run;
pub mod select;

pub use run::{Task, TaskOptions, run_task};
pub use select::run_select;

use crate::core::context::WorkspaceContext;
use crate::core::error::{ConfigError, YardError, YardResult};
use crate::core::vcs::SystemGit;
use crate::graph::{SelectionRequest, changed, selection};

/// Resolve a request into the expanded selection, in deterministic order.
///
/// Validates usage (`--compare-branch` requires `--changed`) before any
/// graph work, fetches the changed set from git when requested, and runs
/// the BFS expansion.
pub(crate) fn build_selection(ctx: &WorkspaceContext, request: &SelectionRequest) -> YardResult<Vec<String>> {
  if request.compare_branch.is_some() && !request.include_changed {
    return Err(YardError::Config(ConfigError::CompareBranchWithoutChanged));
  }

  let changed_set = if request.include_changed {
    let git = SystemGit::open(ctx.workspace_root())?;
    // Flag wins over the configured default; both absent means
    // "working tree vs. last commit".
    let base = request.compare_branch.as_deref().or(ctx.config.compare_branch.as_deref());
    changed::changed_since(&ctx.graph, ctx.workspace_root(), &git, base)?
  } else {
    Vec::new()
  };

  selection::expand(
    &ctx.graph,
    &request.explicit,
    &changed_set,
    request.ancestors,
    request.descendants,
  )
}
