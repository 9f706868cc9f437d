mod commands;
mod core;
mod driver;
mod graph;
mod manifest;
mod ui;

use crate::core::error::{YardError, print_error};
use clap::{Args, Parser, Subcommand};
use commands::{Task, TaskOptions};
use graph::SelectionRequest;

/// Graph-aware task selection and scheduling for monorepo workspaces
#[derive(Parser)]
#[command(name = "switchyard")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

/// Selection flags shared by every command
#[derive(Args)]
struct SelectionArgs {
  /// Workspace names to select
  names: Vec<String>,

  /// Include workspaces that transitively depend on the selection
  #[arg(long)]
  ancestors: bool,

  /// Include workspaces the selection transitively depends on
  #[arg(long)]
  descendants: bool,

  /// Include workspaces with changes relative to the compare branch
  #[arg(long)]
  changed: bool,

  /// Git ref to diff against (requires --changed)
  #[arg(long)]
  compare_branch: Option<String>,
}

/// Flags shared by the build/test/lint task commands
#[derive(Args)]
struct TaskArgs {
  #[command(flatten)]
  selection: SelectionArgs,

  /// Proceed past a dependency cycle by excluding the requested
  /// package from cycle analysis
  #[arg(long)]
  dangerously_ignore_circular_dependencies: bool,

  /// Show the scheduled batches without executing any scripts
  #[arg(long)]
  dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the expanded selection as JSON
  Select {
    #[command(flatten)]
    selection: SelectionArgs,

    /// Print dependency-ordered batches instead of a flat list
    #[arg(long)]
    buildable: bool,
  },

  /// Build selected workspaces in dependency order
  Build {
    #[command(flatten)]
    args: TaskArgs,
  },

  /// Test selected workspaces in dependency order
  Test {
    #[command(flatten)]
    args: TaskArgs,
  },

  /// Lint selected workspaces in dependency order
  Lint {
    #[command(flatten)]
    args: TaskArgs,
  },
}

impl SelectionArgs {
  fn into_request(self, buildable: bool) -> SelectionRequest {
    SelectionRequest {
      explicit: dedup_preserving_order(self.names),
      include_changed: self.changed,
      compare_branch: self.compare_branch,
      ancestors: self.ancestors,
      descendants: self.descendants,
      buildable,
    }
  }
}

impl TaskArgs {
  fn into_task_options(self) -> TaskOptions {
    TaskOptions {
      request: self.selection.into_request(false),
      dangerously_ignore_circular_dependencies: self.dangerously_ignore_circular_dependencies,
      dry_run: self.dry_run,
    }
  }
}

/// Normalize repeated names on the command line, keeping first occurrence.
fn dedup_preserving_order(names: Vec<String>) -> Vec<String> {
  let mut out: Vec<String> = Vec::with_capacity(names.len());
  for name in names {
    if !out.contains(&name) {
      out.push(name);
    }
  }
  out
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  // Build workspace context once (config, manifests, graph); every
  // command shares it and nothing persists between invocations.
  let workspace_root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  let ctx = match crate::core::context::WorkspaceContext::build(&workspace_root) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Select { selection, buildable } => {
      commands::run_select(&ctx, selection.into_request(buildable))
    }
    Commands::Build { args } => commands::run_task(&ctx, Task::Build, args.into_task_options()),
    Commands::Test { args } => commands::run_task(&ctx, Task::Test, args.into_task_options()),
    Commands::Lint { args } => commands::run_task(&ctx, Task::Lint, args.into_task_options()),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: YardError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
