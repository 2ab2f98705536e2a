//! Task execution engine
//!
//! This module handles variable resolution, up-to-date checks and running
//! the commands of a task.

pub mod command;
pub mod context;
pub mod interpolate;
pub mod resolve;
pub mod task;

// Re-export main types
pub use command::*;
pub use context::*;
pub use interpolate::*;
pub use resolve::*;
pub use task::*;
