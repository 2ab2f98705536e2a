//! Up-to-date checks
//!
//! A [`Checker`] decides whether a task can be skipped. A new checker is
//! built for every evaluation from the task's configuration; the only state
//! that outlives it is whatever it keeps on disk under the scratch
//! directory.
//!
//! Checkers are not safe to run concurrently for the same task name. The
//! runner evaluates a given task once at a time.

pub mod files;
pub mod timestamp;

use crate::error::StatusResult;
use std::time::SystemTime;

// Re-export main types
pub use files::*;
pub use timestamp::*;

/// A strategy for deciding whether a task's outputs are current
pub trait Checker {
    /// Whether the task can be skipped.
    ///
    /// Uncertainty resolves to `false`: a check that cannot be evaluated
    /// must never stop the task from running.
    fn is_up_to_date(&self) -> StatusResult<bool>;

    /// Short name of the strategy
    fn kind(&self) -> &'static str;

    /// The value the strategy compares against
    fn value(&self) -> StatusResult<StatusValue>;

    /// Undo partial state after the task failed
    fn on_error(&self) -> StatusResult<()>;
}

/// The value reported by [`Checker::value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusValue {
    /// Newest modification time among the sources, or the Unix epoch when
    /// no source is tracked
    Timestamp(SystemTime),
}

impl StatusValue {
    /// Whether this is the "nothing tracked" value
    pub fn is_epoch(&self) -> bool {
        match self {
            StatusValue::Timestamp(t) => *t == SystemTime::UNIX_EPOCH,
        }
    }
}
