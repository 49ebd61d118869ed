//! Filesystem helpers for walking dump directories.
//!
//! Listings keep the order `read_dir` returns, which is platform dependent.
//! Callers that need a stable order sort the result themselves.

use std::path::{Path, PathBuf};

use crate::PolarError;

/// True if `path` exists and is a regular file (symlinks are followed).
pub fn is_regular_file(path: &Path) -> bool {
    path.is_file()
}

/// Names of the immediate subdirectories of `dir`.
pub fn list_dirs(dir: &Path) -> Result<Vec<String>, PolarError> {
    list_entries(dir, |p| p.is_dir())
}

/// Names of the regular files directly inside `dir`.
pub fn list_files(dir: &Path) -> Result<Vec<String>, PolarError> {
    list_entries(dir, is_regular_file)
}

fn list_entries(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<String>, PolarError> {
    let enumeration_error = |e: std::io::Error| PolarError::DirectoryEnumeration {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(enumeration_error)? {
        let entry = entry.map_err(enumeration_error)?;
        let path: PathBuf = entry.path();
        if !keep(&path) {
            continue;
        }
        // Non-UTF-8 names cannot match any known file or directory name.
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
