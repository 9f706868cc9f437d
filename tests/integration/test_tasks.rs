//! Integration tests for the build/test/lint task commands

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_build_runs_in_dependency_order() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package("app", &["lib"])?;
  ws.add_package("lib", &["util"])?;
  ws.add_package("util", &[])?;
  ws.commit("Add packages")?;

  let output = run_switchyard(&ws.path, &["build", "app", "--descendants"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("3 package(s) in 3 batch(es)"), "unexpected plan: {}", stdout);
  let util_pos = stdout.find("1. util").expect("util should be batch 1");
  let lib_pos = stdout.find("2. lib").expect("lib should be batch 2");
  let app_pos = stdout.find("3. app").expect("app should be batch 3");
  assert!(util_pos < lib_pos && lib_pos < app_pos);
  assert!(stdout.contains("✅ build completed for 3 package(s)"));

  Ok(())
}

#[test]
fn test_dry_run_executes_nothing() -> Result<()> {
  // With a runner that always fails, a dry run still exits 0 because
  // no script is ever spawned.
  let ws = TestWorkspace::with_runner("false")?;
  ws.add_package("app", &[])?;
  ws.commit("Add app")?;

  let output = run_switchyard(&ws.path, &["build", "app", "--dry-run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("DRY RUN"), "unexpected output: {}", stdout);
  assert!(stdout.contains("1. app"));

  Ok(())
}

#[test]
fn test_failing_script_fails_the_run() -> Result<()> {
  let ws = TestWorkspace::with_runner("false")?;
  ws.add_package("app", &[])?;
  ws.commit("Add app")?;

  let output = run_switchyard_raw(&ws.path, &["build", "app"])?;
  assert_eq!(output.status.code(), Some(3));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("app"), "stderr should name the failed package: {}", stderr);

  Ok(())
}

#[test]
fn test_missing_script_is_skipped() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_workspace("app", &[], "app", &["build"])?;
  ws.add_workspace("assets", &[], "package", &[])?;
  ws.commit("Add packages")?;

  let output = run_switchyard(&ws.path, &["build", "app", "assets"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("⏭"), "assets should be skipped: {}", stdout);

  Ok(())
}

#[test]
fn test_empty_selection_is_a_no_op_success() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package("app", &[])?;
  ws.commit("Add app")?;

  let output = run_switchyard(&ws.path, &["build"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("No workspaces to build"), "unexpected output: {}", stdout);

  Ok(())
}

#[test]
fn test_non_buildable_kind_is_a_no_op_success() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_workspace("docs", &[], "source", &["build", "lint"])?;
  ws.commit("Add docs")?;

  let output = run_switchyard(&ws.path, &["build", "docs"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("No workspaces to build"), "unexpected output: {}", stdout);

  Ok(())
}

#[test]
fn test_lint_applies_to_source_kind() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_workspace("docs", &[], "source", &["build", "lint"])?;
  ws.commit("Add docs")?;

  let output = run_switchyard(&ws.path, &["lint", "docs"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("✅ lint completed for 1 package(s)"), "unexpected output: {}", stdout);

  Ok(())
}

#[test]
fn test_test_command_drives_changed_packages() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package("app", &["lib"])?;
  ws.add_package("lib", &[])?;
  ws.commit("Add packages")?;
  git(&ws.path, &["branch", "baseline"])?;

  ws.modify_file("lib", "src/index.ts", "// changed\n")?;
  ws.commit("Change lib")?;

  let output = run_switchyard(&ws.path, &[
    "test",
    "--changed",
    "--compare-branch",
    "baseline",
    "--ancestors",
  ])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("✅ test completed for 2 package(s)"), "unexpected output: {}", stdout);
  let lib_pos = stdout.find("1. lib").expect("lib should be batch 1");
  let app_pos = stdout.find("2. app").expect("app should be batch 2");
  assert!(lib_pos < app_pos);

  Ok(())
}

#[test]
fn test_serial_jobs_schedule_one_package_per_batch() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package("app", &["lib", "util"])?;
  ws.add_package("lib", &[])?;
  ws.add_package("util", &[])?;
  std::fs::write(
    ws.path.join("switchyard.toml"),
    "members = [\"packages/*\"]\nrunner = \"true\"\njobs = 1\n",
  )?;
  ws.commit("Add packages")?;

  let output = run_switchyard(&ws.path, &["build", "app", "--descendants"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("3 package(s) in 3 batch(es)"), "unexpected plan: {}", stdout);
  let lib_pos = stdout.find("1. lib").expect("lib should run first");
  let util_pos = stdout.find("2. util").expect("util should run second");
  let app_pos = stdout.find("3. app").expect("app should run last");
  assert!(lib_pos < util_pos && util_pos < app_pos);

  Ok(())
}

#[test]
fn test_configless_directory_is_an_empty_workspace() -> Result<()> {
  let dir = tempfile::TempDir::new()?;

  let output = run_switchyard(dir.path(), &["select"])?;
  assert_eq!(json_stdout(&output)?, serde_json::json!([]));

  Ok(())
}

#[test]
fn test_changed_outside_git_repository_fails() -> Result<()> {
  let dir = tempfile::TempDir::new()?;

  let output = run_switchyard_raw(dir.path(), &["select", "--changed"])?;
  assert_eq!(output.status.code(), Some(2));

  Ok(())
}
