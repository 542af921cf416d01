use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Resolves the set of files a run will touch.
///
/// The list is built once, up front, and never refreshed: files the formatter
/// creates or deletes mid-run are not picked up.
pub struct FileEnumerator {
    recurse: bool,
    extension: Option<String>,
    egg_dir: Regex,
}

impl FileEnumerator {
    /// `extension` must include the leading dot (`".py"`). `None` or an empty
    /// string keeps every file.
    pub fn new(recurse: bool, extension: Option<&str>) -> Result<Self> {
        let extension = extension
            .filter(|ext| !ext.is_empty())
            .map(str::to_string);
        let egg_dir = Regex::new(r"^.*\.egg$").context("Failed to compile egg pattern")?;

        Ok(Self {
            recurse,
            extension,
            egg_dir,
        })
    }

    /// Lists matching files under `root`, sorted by path.
    ///
    /// A `root` that is itself a file yields just that file. Without
    /// recursion only the immediate children of `root` are considered and
    /// directories among them are skipped.
    pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let candidates = if root.is_file() {
            vec![root.to_path_buf()]
        } else if self.recurse {
            self.walk(root)
        } else {
            self.list(root)?
        };

        let mut files: Vec<PathBuf> = candidates
            .into_iter()
            .filter(|path| self.matches_extension(path))
            .filter(|path| !self.is_in_egg(path))
            .collect();
        files.sort();

        debug!(root = %root.display(), count = files.len(), "enumerated files");
        Ok(files)
    }

    /// True when the final extension of `path`, dot included, equals the filter.
    pub fn matches_extension(&self, path: &Path) -> bool {
        let Some(wanted) = &self.extension else {
            return true;
        };

        match path.extension() {
            Some(ext) => format!(".{}", ext.to_string_lossy()) == *wanted,
            None => false,
        }
    }

    fn is_in_egg(&self, path: &Path) -> bool {
        path.components()
            .any(|component| self.egg_dir.is_match(&component.as_os_str().to_string_lossy()))
    }

    fn walk(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry: {err}");
                    continue;
                }
            };

            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if is_file {
                files.push(entry.into_path());
            }
        }
        files
    }

    fn list(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(root)
            .with_context(|| format!("Failed to list directory {}", root.display()))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry
                .with_context(|| format!("Failed to read entry in {}", root.display()))?;
            let path = root.join(entry.file_name());
            if path.is_dir() {
                debug!(path = %path.display(), "skipping directory in non-recursive listing");
                continue;
            }
            files.push(path);
        }
        Ok(files)
    }
}
