//! Workspace graph, selection and scheduling
//!
//! The core of switchyard: everything here is a pure, synchronous
//! computation over in-memory data, recomputed from scratch on every
//! invocation.
//!
//! - **workspace_graph**: manifest set → immutable dependency graph
//! - **cycles**: first-cycle witness detection
//! - **selection**: multi-source BFS expansion of the user's frontier
//! - **schedule**: flat topological order and parallel-safe batches
//! - **changed**: changed-file set → changed workspace set

pub mod changed;
pub mod cycles;
pub mod schedule;
pub mod selection;
pub mod workspace_graph;

pub use selection::SelectionRequest;
pub use workspace_graph::WorkspaceGraph;
