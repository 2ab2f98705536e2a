//! File helpers shared by checkers

use crate::error::{StatusError, StatusResult};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Expand `patterns` relative to `dir` into existing files.
///
/// Absolute patterns are used as-is. Glob characters in `dir` itself are
/// matched literally. Directories are skipped. The result is absolute,
/// sorted and free of duplicates.
pub fn expand(dir: &Path, patterns: &[String]) -> StatusResult<Vec<PathBuf>> {
    let base = PathBuf::from(glob::Pattern::escape(&absolute(dir)?.to_string_lossy()));
    let mut files = BTreeSet::new();

    for pattern in patterns {
        let full = if Path::new(pattern).is_absolute() {
            PathBuf::from(pattern)
        } else {
            base.join(pattern)
        };
        let full = full.to_string_lossy();

        let entries = glob::glob(&full).map_err(|e| StatusError::Pattern {
            pattern: pattern.clone(),
            error: e.to_string(),
        })?;

        for entry in entries {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                StatusError::Io {
                    path,
                    source: e.into_error(),
                }
            })?;
            if path.is_file() {
                files.insert(path);
            }
        }
    }

    Ok(files.into_iter().collect())
}

fn absolute(dir: &Path) -> StatusResult<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = env::current_dir().map_err(|source| StatusError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(cwd.join(dir))
}

/// Newest modification time among `files`, `None` for an empty list.
///
/// Fails on the first file that cannot be read.
pub fn max_mod_time<P: AsRef<Path>>(files: &[P]) -> StatusResult<Option<SystemTime>> {
    let mut max: Option<SystemTime> = None;
    for file in files {
        let modified = mod_time(file.as_ref())?;
        max = Some(match max {
            Some(current) if current >= modified => current,
            _ => modified,
        });
    }
    Ok(max)
}

/// Whether any of `files` was modified strictly after `time`.
///
/// Stops at the first file that qualifies.
pub fn any_file_newer_than<P: AsRef<Path>>(files: &[P], time: SystemTime) -> StatusResult<bool> {
    for file in files {
        if mod_time(file.as_ref())? > time {
            return Ok(true);
        }
    }
    Ok(false)
}

fn mod_time(path: &Path) -> StatusResult<SystemTime> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|source| StatusError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Turn a task name into a file name.
///
/// ASCII letters, digits, `-` and `_` are kept and everything else becomes
/// `-`. If anything was replaced, a short hash of the original name is
/// appended so that `a:b` and `a-b` do not share a file.
pub fn normalize_filename(name: &str) -> String {
    let mut replaced = false;
    let mut normalized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                replaced = true;
                '-'
            }
        })
        .collect();

    if replaced || normalized.is_empty() {
        let mut hasher = Sha256::new();
        hasher.update(name.as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        normalized.push('-');
        normalized.push_str(&digest[..8]);
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn base_time() -> SystemTime {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        SystemTime::UNIX_EPOCH + Duration::from_secs(now - 1000)
    }

    fn write_with_mtime(path: &Path, mtime: SystemTime) {
        fs::write(path, "x").unwrap();
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(mtime).unwrap();
    }

    #[test]
    fn test_expand_relative_patterns() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("src")).unwrap();
        fs::write(temp_dir.path().join("src/b.c"), "").unwrap();
        fs::write(temp_dir.path().join("src/a.c"), "").unwrap();
        fs::write(temp_dir.path().join("src/a.h"), "").unwrap();

        let files = expand(temp_dir.path(), &["src/*.c".to_string()]).unwrap();
        assert_eq!(
            files,
            vec![temp_dir.path().join("src/a.c"), temp_dir.path().join("src/b.c")]
        );
    }

    #[test]
    fn test_expand_skips_directories_and_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        fs::write(temp_dir.path().join("file.txt"), "").unwrap();

        let patterns = vec!["*".to_string(), "file.txt".to_string()];
        let files = expand(temp_dir.path(), &patterns).unwrap();
        assert_eq!(files, vec![temp_dir.path().join("file.txt")]);
    }

    #[test]
    fn test_expand_dir_with_glob_characters() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("proj[1]");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("main.c"), "").unwrap();
        fs::write(project.join("util.c"), "").unwrap();

        let files = expand(&project, &["main.c".to_string()]).unwrap();
        assert_eq!(files, vec![project.join("main.c")]);

        let files = expand(&project, &["*.c".to_string()]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_expand_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let files = expand(temp_dir.path(), &["nothing.txt".to_string()]).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_expand_bad_pattern() {
        let temp_dir = TempDir::new().unwrap();
        let result = expand(temp_dir.path(), &["src/[".to_string()]);
        assert!(matches!(result, Err(StatusError::Pattern { .. })));
    }

    #[test]
    fn test_max_mod_time() {
        let temp_dir = TempDir::new().unwrap();
        let base = base_time();
        let old = temp_dir.path().join("old");
        let new = temp_dir.path().join("new");
        write_with_mtime(&old, base);
        write_with_mtime(&new, base + Duration::from_secs(50));

        let max = max_mod_time(&[old.clone(), new.clone()]).unwrap();
        assert_eq!(max, Some(base + Duration::from_secs(50)));

        let none: [PathBuf; 0] = [];
        assert_eq!(max_mod_time(&none).unwrap(), None);

        let missing = temp_dir.path().join("missing");
        assert!(max_mod_time(&[old, missing]).is_err());
    }

    #[test]
    fn test_any_file_newer_than_is_strict_and_lazy() {
        let temp_dir = TempDir::new().unwrap();
        let base = base_time();
        let file = temp_dir.path().join("file");
        write_with_mtime(&file, base);

        assert!(!any_file_newer_than(&[file.clone()], base).unwrap());
        assert!(any_file_newer_than(&[file.clone()], base - Duration::from_secs(1)).unwrap());

        // stops before reaching the missing file
        let missing = temp_dir.path().join("missing");
        let earlier = base - Duration::from_secs(1);
        assert!(any_file_newer_than(&[file.clone(), missing.clone()], earlier).unwrap());
        assert!(any_file_newer_than(&[file, missing], base).is_err());
    }

    #[test]
    fn test_normalize_filename() {
        assert_eq!(normalize_filename("build"), "build");
        assert_eq!(normalize_filename("gen-docs_v2"), "gen-docs_v2");

        let namespaced = normalize_filename("docs:build");
        assert!(namespaced.starts_with("docs-build-"));
        assert_eq!(namespaced.len(), "docs-build-".len() + 8);
        assert_ne!(namespaced, normalize_filename("docs-build"));
        assert_ne!(namespaced, normalize_filename("docs/build"));
        assert_eq!(namespaced, normalize_filename("docs:build"));

        assert!(!normalize_filename("../etc").contains('/'));
        assert!(!normalize_filename("").is_empty());
    }
}
