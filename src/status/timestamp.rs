//! Modification-time based up-to-date check

use crate::error::StatusResult;
use crate::status::{any_file_newer_than, expand, max_mod_time, normalize_filename};
use crate::status::{Checker, StatusValue};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// Compares the modification times of a task's sources against those of
/// the files it generates.
///
/// A sentinel file per task lives under `<temp_dir>/timestamp/`. Once it
/// exists it counts as one of the generated files, and it is moved to the
/// current time every time the task is found up to date. The next check
/// then measures changes since that confirmation rather than since the
/// outputs were last written.
#[derive(Debug, Clone, Default)]
pub struct Timestamp {
    /// Scratch directory holding checker state
    pub temp_dir: PathBuf,

    /// Task name, used to locate the sentinel file
    pub task: String,

    /// Base directory for relative patterns
    pub dir: PathBuf,

    /// Source patterns
    pub sources: Vec<String>,

    /// Generated file patterns
    pub generates: Vec<String>,

    /// Never write to the file system
    pub dry: bool,
}

impl Timestamp {
    /// Create a checker for `task` resolving patterns under `dir`
    pub fn new(task: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Timestamp {
            task: task.into(),
            dir: dir.into(),
            ..Default::default()
        }
    }

    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_generates(mut self, generates: Vec<String>) -> Self {
        self.generates = generates;
        self
    }

    pub fn with_dry(mut self, dry: bool) -> Self {
        self.dry = dry;
        self
    }

    /// Location of this task's sentinel file
    pub fn timestamp_file_path(&self) -> PathBuf {
        self.temp_dir
            .join("timestamp")
            .join(normalize_filename(&self.task))
    }

    fn stale(&self, reason: &str) -> StatusResult<bool> {
        debug!(task = %self.task, "not up to date: {}", reason);
        Ok(false)
    }
}

impl Checker for Timestamp {
    fn is_up_to_date(&self) -> StatusResult<bool> {
        let now = SystemTime::now();

        if self.sources.is_empty() {
            return self.stale("no sources");
        }

        let sources = match expand(&self.dir, &self.sources) {
            Ok(files) => files,
            Err(e) => return self.stale(&format!("expanding sources: {}", e)),
        };
        let mut generates = match expand(&self.dir, &self.generates) {
            Ok(files) => files,
            Err(e) => return self.stale(&format!("expanding generates: {}", e)),
        };

        let sentinel = self.timestamp_file_path();
        if sentinel.exists() {
            generates.push(sentinel.clone());
        } else if !self.dry {
            if let Err(e) = create_file(&sentinel) {
                debug!(path = %sentinel.display(), error = %e, "failed to create timestamp file");
            }
        }

        let generated_at = match max_mod_time(&generates) {
            Ok(Some(time)) => time,
            Ok(None) => return self.stale("nothing generated yet"),
            Err(e) => return self.stale(&e.to_string()),
        };

        match any_file_newer_than(&sources, generated_at) {
            Ok(false) => {}
            Ok(true) => return self.stale("a source changed"),
            Err(e) => return self.stale(&e.to_string()),
        }

        if !self.dry {
            if let Err(e) = touch(&sentinel, now) {
                debug!(path = %sentinel.display(), error = %e, "failed to touch timestamp file");
            }
        }

        debug!(task = %self.task, "up to date");
        Ok(true)
    }

    fn kind(&self) -> &'static str {
        "timestamp"
    }

    fn value(&self) -> StatusResult<StatusValue> {
        let sources = expand(&self.dir, &self.sources)?;
        let newest = max_mod_time(&sources)?;
        Ok(StatusValue::Timestamp(
            newest.unwrap_or(SystemTime::UNIX_EPOCH),
        ))
    }

    fn on_error(&self) -> StatusResult<()> {
        Ok(())
    }
}

fn create_file(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::File::options()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)?;
    Ok(())
}

fn touch(path: &Path, time: SystemTime) -> io::Result<()> {
    let file = fs::File::options().write(true).open(path)?;
    file.set_modified(time)
}
