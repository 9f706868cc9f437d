//! `switchyard build|test|lint` - Drive package scripts in dependency order
//!
//! The three task commands share one pipeline:
//!
//! 1. Expand the selection (explicit names + changed set + BFS flags)
//! 2. Filter to the kinds the task applies to
//! 3. Detect cycles; optionally recover via the dangerous override
//! 4. Schedule parallel-safe batches
//! 5. Hand the batches to the driver (or print them with `--dry-run`)
//!
//! The dangerous override removes the explicitly requested package(s)
//! from the graph as vertices and retests. If the reduced graph is
//! acyclic the run proceeds with a warning and the removed packages run
//! last, after all of their remaining dependencies; if a cycle survives,
//! the run fails with the remaining witness and no further removals are
//! attempted.

use crate::commands::build_selection;
use crate::core::context::WorkspaceContext;
use crate::core::error::{YardError, YardResult};
use crate::driver;
use crate::graph::{SelectionRequest, WorkspaceGraph, cycles, schedule, selection};
use crate::manifest::WorkspaceKind;

/// Which task script a command drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
  Build,
  Test,
  Lint,
}

impl Task {
  /// Manifest script name
  pub fn script(self) -> &'static str {
    match self {
      Task::Build => "build",
      Task::Test => "test",
      Task::Lint => "lint",
    }
  }

  /// Whether this task applies to a workspace of the given kind
  fn applies_to(self, kind: WorkspaceKind) -> bool {
    match self {
      Task::Build => kind.is_buildable(),
      Task::Test => kind.is_testable(),
      Task::Lint => kind.is_lintable(),
    }
  }
}

/// Flags accepted by build/test/lint
#[derive(Debug, Clone, Default)]
pub struct TaskOptions {
  pub request: SelectionRequest,
  pub dangerously_ignore_circular_dependencies: bool,
  pub dry_run: bool,
}

/// Run one task command end to end
pub fn run_task(ctx: &WorkspaceContext, task: Task, opts: TaskOptions) -> YardResult<()> {
  let selection = build_selection(ctx, &opts.request)?;

  let targets: Vec<String> = selection
    .into_iter()
    .filter(|name| ctx.graph.get(name).is_some_and(|w| task.applies_to(w.kind)))
    .collect();

  if targets.is_empty() {
    // Empty selection is a successful no-op, not an error
    println!("✅ No workspaces to {}", task.script());
    return Ok(());
  }

  let batches = plan_batches(ctx, task, &opts, &targets)?;

  display_plan(task, &batches);

  if opts.dry_run {
    println!("\nDRY RUN: no scripts were executed");
    return Ok(());
  }

  driver::run_batches(ctx, task.script(), &batches)?;

  println!("\n✅ {} completed for {} package(s)", task.script(), batch_len(&batches));
  Ok(())
}

/// Schedule the filtered targets, applying the dangerous cycle override
/// when requested.
fn plan_batches(
  ctx: &WorkspaceContext,
  task: Task,
  opts: &TaskOptions,
  targets: &[String],
) -> YardResult<Vec<Vec<String>>> {
  let Some(cycle) = cycles::find_cycle(&ctx.graph) else {
    // Serial runs get a flat topological order; singleton batches keep
    // the driver loop uniform.
    if ctx.config.jobs == Some(1) {
      let order = schedule::flat_order(&ctx.graph, targets)?;
      return Ok(order.into_iter().map(|name| vec![name]).collect());
    }
    return schedule::batched_order(&ctx.graph, targets);
  };

  if !opts.dangerously_ignore_circular_dependencies {
    return Err(YardError::Cycle(cycle));
  }

  // Remove only the packages named on the command line, never nodes
  // pulled in by expansion, then retest once.
  let removed: Vec<&str> = opts.request.explicit.iter().map(String::as_str).collect();
  let reduced: WorkspaceGraph = ctx.graph.without(&removed);

  if let Some(remaining) = cycles::find_cycle(&reduced) {
    return Err(YardError::Cycle(remaining));
  }

  eprintln!(
    "⚠️  Ignoring dependency cycle {} for {}; {} will run last",
    cycle.path.join(" -> "),
    task.script(),
    opts.request.explicit.join(", ")
  );

  // The removed packages still need their surviving dependencies built
  // first, so pull those back into the schedule along with anything
  // they depend on in the reduced graph.
  let mut scheduled: Vec<String> = targets.iter().filter(|t| !removed.contains(&t.as_str())).cloned().collect();
  let mut seeds: Vec<String> = Vec::new();
  for name in &opts.request.explicit {
    for dep in ctx.graph.depends_on(name) {
      if reduced.contains(dep) && !seeds.iter().any(|s| s == dep) {
        seeds.push(dep.to_string());
      }
    }
  }
  for name in selection::expand(&reduced, &seeds, &[], false, true)? {
    if !scheduled.contains(&name) {
      scheduled.push(name);
    }
  }
  let mut batches = schedule::batched_order(&reduced, &scheduled)?;

  // The removed packages run after every remaining dependency, one
  // terminal batch per package in the order they were requested.
  for name in &opts.request.explicit {
    if targets.contains(name) {
      batches.push(vec![name.clone()]);
    }
  }

  Ok(batches)
}

fn display_plan(task: Task, batches: &[Vec<String>]) {
  println!("🎯 {} plan: {} package(s) in {} batch(es)", task.script(), batch_len(batches), batches.len());
  for (i, batch) in batches.iter().enumerate() {
    println!("  {}. {}", i + 1, batch.join(", "));
  }
}

fn batch_len(batches: &[Vec<String>]) -> usize {
  batches.iter().map(Vec::len).sum()
}
