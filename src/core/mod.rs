//! Core plumbing shared by all switchyard commands
//!
//! - **config**: switchyard.toml parsing and workspace root discovery
//! - **context**: unified workspace context for efficient data sharing
//! - **error**: categorized error types with exit codes and help messages
//! - **vcs**: git operations abstraction (SystemGit change provider)

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
