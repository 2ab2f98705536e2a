//! Taskr - a YAML-based task runner
//!
//! Tasks declare the files they read (`sources`) and the files they produce
//! (`generates`). Before a task runs, a [`status::Checker`] decides whether
//! its outputs are already up to date. Task commands are rendered from an
//! ordered set of [`vars::Vars`] layered from the global config, the task
//! and the command line.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod status;
pub mod vars;

// Re-export commonly used types
pub use error::{Result, TaskrError};

/// Current version of Taskr
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
