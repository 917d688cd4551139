//! Source file discovery.

use globset::GlobSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Every file under `dir` whose path relative to `dir` matches `globs`, sorted.
///
/// A missing directory yields an empty list.
pub fn collect_sources(dir: &Path, globs: &GlobSet) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .strip_prefix(dir)
                .map(|rel| globs.is_match(rel.to_string_lossy().replace('\\', "/")))
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// `relative` entries resolved against `root`, keeping only existing directories.
pub fn existing_dirs(root: &Path, relative: &[String]) -> Vec<PathBuf> {
    relative
        .iter()
        .map(|dir| root.join(dir))
        .filter(|dir| dir.is_dir())
        .collect()
}
