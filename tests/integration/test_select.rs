//! Integration tests for the select command

use crate::helpers::*;
use anyhow::Result;
use serde_json::json;

/// The recurring shape in these tests: e -> a -> b -> c -> d plus an
/// isolated f.
fn chain_workspace() -> Result<TestWorkspace> {
  let ws = TestWorkspace::new()?;
  ws.add_package("a", &["b"])?;
  ws.add_package("b", &["c"])?;
  ws.add_package("c", &["d"])?;
  ws.add_package("d", &[])?;
  ws.add_package("e", &["a"])?;
  ws.add_package("f", &[])?;
  ws.commit("Add packages")?;
  Ok(ws)
}

#[test]
fn test_select_explicit_names_only() -> Result<()> {
  let ws = chain_workspace()?;

  let output = run_switchyard(&ws.path, &["select", "c", "a"])?;
  assert_eq!(json_stdout(&output)?, json!(["c", "a"]));

  Ok(())
}

#[test]
fn test_select_descendants() -> Result<()> {
  let ws = chain_workspace()?;

  let output = run_switchyard(&ws.path, &["select", "b", "--descendants"])?;
  assert_eq!(json_stdout(&output)?, json!(["b", "c", "d"]));

  Ok(())
}

#[test]
fn test_select_ancestors() -> Result<()> {
  let ws = chain_workspace()?;

  let output = run_switchyard(&ws.path, &["select", "b", "--ancestors"])?;
  assert_eq!(json_stdout(&output)?, json!(["b", "a", "e"]));

  Ok(())
}

#[test]
fn test_select_multi_source_ancestors_expand_level_by_level() -> Result<()> {
  let ws = chain_workspace()?;

  let output = run_switchyard(&ws.path, &["select", "d", "a", "--ancestors"])?;
  assert_eq!(json_stdout(&output)?, json!(["d", "a", "c", "e", "b"]));

  Ok(())
}

#[test]
fn test_select_both_directions() -> Result<()> {
  let ws = chain_workspace()?;

  let output = run_switchyard(&ws.path, &["select", "b", "--ancestors", "--descendants"])?;
  assert_eq!(json_stdout(&output)?, json!(["b", "a", "e", "c", "d"]));

  Ok(())
}

#[test]
fn test_select_buildable_batches() -> Result<()> {
  let ws = chain_workspace()?;

  let output = run_switchyard(&ws.path, &["select", "a", "b", "c", "d", "e", "f", "--buildable"])?;
  assert_eq!(
    json_stdout(&output)?,
    json!([["d"], ["c"], ["b"], ["a"], ["e", "f"]])
  );

  Ok(())
}

#[test]
fn test_select_buildable_filters_non_buildable_kinds() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_workspace("docs", &[], "source", &["lint"])?;
  ws.commit("Add docs")?;

  let output = run_switchyard(&ws.path, &["select", "docs", "--buildable"])?;
  assert_eq!(json_stdout(&output)?, json!([]));

  Ok(())
}

#[test]
fn test_select_empty_selection() -> Result<()> {
  let ws = chain_workspace()?;

  let output = run_switchyard(&ws.path, &["select"])?;
  assert_eq!(json_stdout(&output)?, json!([]));

  Ok(())
}

#[test]
fn test_select_unknown_workspace_fails() -> Result<()> {
  let ws = chain_workspace()?;

  let output = run_switchyard_raw(&ws.path, &["select", "nope"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("nope"), "stderr should name the workspace: {}", stderr);

  Ok(())
}

#[test]
fn test_select_compare_branch_requires_changed() -> Result<()> {
  let ws = chain_workspace()?;

  let output = run_switchyard_raw(&ws.path, &["select", "--compare-branch", "main"])?;
  assert_eq!(output.status.code(), Some(1));

  Ok(())
}

#[test]
fn test_select_changed_against_branch() -> Result<()> {
  let ws = chain_workspace()?;
  git(&ws.path, &["branch", "baseline"])?;

  ws.modify_file("c", "src/index.ts", "// changed\n")?;
  ws.commit("Change c")?;

  let output = run_switchyard(&ws.path, &["select", "--changed", "--compare-branch", "baseline"])?;
  assert_eq!(json_stdout(&output)?, json!(["c"]));

  Ok(())
}

#[test]
fn test_select_changed_with_ancestors() -> Result<()> {
  let ws = chain_workspace()?;
  git(&ws.path, &["branch", "baseline"])?;

  ws.modify_file("c", "src/index.ts", "// changed\n")?;
  ws.commit("Change c")?;

  let output = run_switchyard(&ws.path, &[
    "select",
    "--changed",
    "--compare-branch",
    "baseline",
    "--ancestors",
  ])?;
  assert_eq!(json_stdout(&output)?, json!(["c", "b", "a", "e"]));

  Ok(())
}

#[test]
fn test_select_changed_sees_uncommitted_edits() -> Result<()> {
  let ws = chain_workspace()?;

  ws.modify_file("f", "src/index.ts", "// dirty\n")?;

  let output = run_switchyard(&ws.path, &["select", "--changed"])?;
  assert_eq!(json_stdout(&output)?, json!(["f"]));

  Ok(())
}

#[test]
fn test_select_changed_sees_untracked_files() -> Result<()> {
  let ws = chain_workspace()?;

  ws.modify_file("d", "src/extra.ts", "// new file\n")?;

  let output = run_switchyard(&ws.path, &["select", "--changed"])?;
  assert_eq!(json_stdout(&output)?, json!(["d"]));

  Ok(())
}

#[test]
fn test_select_explicit_and_changed_merge_without_duplicates() -> Result<()> {
  let ws = chain_workspace()?;

  ws.modify_file("a", "src/index.ts", "// dirty\n")?;

  let output = run_switchyard(&ws.path, &["select", "a", "f", "--changed"])?;
  assert_eq!(json_stdout(&output)?, json!(["a", "f"]));

  Ok(())
}
