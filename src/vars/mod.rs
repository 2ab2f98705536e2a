//! Ordered task variables
//!
//! Variables keep the order in which they were first declared. Layering a
//! task's variables over the global ones never moves an existing name, it
//! only replaces its value; new names are appended.
//!
//! A [`Vars`] is built during config loading and layering, then handed to
//! the renderer read-only. Nothing here locks: clone it before sharing it
//! with code that may still mutate it.

pub mod decode;
pub mod ordered;

// Re-export main types
pub use decode::*;
pub use ordered::*;
