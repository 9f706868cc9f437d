//! Git operations abstraction (SystemGit change provider)

pub mod system_git;

pub use system_git::SystemGit;
