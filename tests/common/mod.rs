//! Common test utilities

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// Create a temporary directory with a taskr.yml file
pub fn create_test_config(content: &str) -> (TempDir, PathBuf) {
    create_named_config("taskr.yml", content)
}

/// Create a temporary directory with a config file of the given name
pub fn create_named_config(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(name);
    fs::write(&config_path, content).unwrap();
    (temp_dir, config_path)
}

/// A whole second well in the past, so tests can place files before and
/// after each other without racing the clock
pub fn base_time() -> SystemTime {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs();
    SystemTime::UNIX_EPOCH + Duration::from_secs(now - 10_000)
}

/// `base + secs`
pub fn at(base: SystemTime, secs: u64) -> SystemTime {
    base + Duration::from_secs(secs)
}

/// Write `path` (creating parent directories) and set its modification time
pub fn write_file_at(path: &Path, mtime: SystemTime) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "content").unwrap();
    set_mtime(path, mtime);
}

/// Set the modification time of an existing file
pub fn set_mtime(path: &Path, mtime: SystemTime) {
    let file = fs::File::options().write(true).open(path).unwrap();
    file.set_modified(mtime).unwrap();
}

/// Modification time of an existing file
pub fn mtime(path: &Path) -> SystemTime {
    fs::metadata(path).unwrap().modified().unwrap()
}
