//! Task drivers: run package scripts in scheduled order
//!
//! Consumes the scheduler's batches: members of one batch run
//! concurrently on a bounded rayon pool, and every member of batch N must
//! finish (and have its exit status checked) before batch N+1 starts,
//! because later batches may depend on artifacts earlier ones produced.
//! A failure stops later batches, but already-dispatched siblings in the
//! same batch are allowed to finish and report.
//!
//! A package without the requested script is skipped successfully; retry
//! policy is out of scope, one failing script fails the whole run.

use crate::core::context::WorkspaceContext;
use crate::core::error::{DriverError, YardError, YardResult};
use crate::ui::progress::MultiProgress;
use rayon::prelude::*;
use std::process::Command;

/// Result of driving one package's script.
enum Outcome {
  Ran { name: String },
  Skipped { name: String },
  Failed { name: String, detail: String },
}

/// Drive `script` for every package in every batch, in batch order.
pub fn run_batches(ctx: &WorkspaceContext, script: &str, batches: &[Vec<String>]) -> YardResult<()> {
  let total: usize = batches.iter().map(Vec::len).sum();
  if total == 0 {
    return Ok(());
  }

  let pool = rayon::ThreadPoolBuilder::new()
    .num_threads(ctx.config.jobs.unwrap_or(0)) // 0 = rayon default
    .build()
    .map_err(|e| YardError::message(format!("Failed to build worker pool: {}", e)))?;

  let progress = MultiProgress::new();
  let bar = progress.add_bar(total, format!("{} ({} packages)", script, total));

  for batch in batches {
    let outcomes: Vec<Outcome> = pool.install(|| {
      batch
        .par_iter()
        .map(|name| {
          let outcome = run_script(ctx, script, name);
          progress.inc(&bar);
          outcome
        })
        .collect()
    });

    let mut failed: Vec<String> = Vec::new();
    for outcome in outcomes {
      match outcome {
        Outcome::Ran { name } => println!("✅ {} {}", name, script),
        Outcome::Skipped { name } => println!("⏭  {} has no {} script, skipping", name, script),
        Outcome::Failed { name, detail } => {
          eprintln!("❌ {} {} failed\n{}", name, script, detail);
          failed.push(name);
        }
      }
    }

    if !failed.is_empty() {
      return Err(YardError::Driver(DriverError {
        script: script.to_string(),
        failed,
      }));
    }
  }

  Ok(())
}

/// Run one package's script via the configured runner.
fn run_script(ctx: &WorkspaceContext, script: &str, name: &str) -> Outcome {
  let Some(workspace) = ctx.graph.get(name) else {
    // Selection is validated upstream; a miss here is a scheduling bug.
    return Outcome::Failed {
      name: name.to_string(),
      detail: "workspace disappeared between selection and execution".to_string(),
    };
  };

  if !workspace.scripts.contains_key(script) {
    return Outcome::Skipped { name: name.to_string() };
  }

  let output = Command::new(&ctx.config.runner)
    .arg("run")
    .arg(script)
    .current_dir(ctx.root.join(&workspace.location))
    .output();

  match output {
    Ok(output) if output.status.success() => Outcome::Ran { name: name.to_string() },
    Ok(output) => Outcome::Failed {
      name: name.to_string(),
      detail: tail(&String::from_utf8_lossy(&output.stderr), 20),
    },
    Err(e) => Outcome::Failed {
      name: name.to_string(),
      detail: format!("failed to spawn '{} run {}': {}", ctx.config.runner, script, e),
    },
  }
}

/// Last `n` lines of command output, enough to see why a script failed.
fn tail(text: &str, n: usize) -> String {
  let lines: Vec<&str> = text.lines().collect();
  let start = lines.len().saturating_sub(n);
  lines[start..].join("\n")
}
