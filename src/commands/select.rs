//! `switchyard select` - Print the expanded selection as JSON
//!
//! Flat mode prints a JSON array in selection order (not necessarily a
//! build order). `--buildable` filters to buildable kinds and prints an
//! array of arrays: ordered batches whose members are parallel-safe.
//! Batched output requires an acyclic graph, and unlike build/test/lint
//! there is no override path here.

use crate::commands::build_selection;
use crate::core::context::WorkspaceContext;
use crate::core::error::{YardError, YardResult};
use crate::graph::{SelectionRequest, cycles, schedule};

/// Run the select command
pub fn run_select(ctx: &WorkspaceContext, request: SelectionRequest) -> YardResult<()> {
  let selection = build_selection(ctx, &request)?;

  if !request.buildable {
    println!("{}", serde_json::to_string_pretty(&selection)?);
    return Ok(());
  }

  let targets: Vec<String> = selection
    .into_iter()
    .filter(|name| ctx.graph.get(name).is_some_and(|w| w.kind.is_buildable()))
    .collect();

  if let Some(cycle) = cycles::find_cycle(&ctx.graph) {
    return Err(YardError::Cycle(cycle));
  }

  let batches = schedule::batched_order(&ctx.graph, &targets)?;
  println!("{}", serde_json::to_string_pretty(&batches)?);

  Ok(())
}
