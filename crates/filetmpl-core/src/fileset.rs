//! Filesystem walk with Ant-style include/exclude patterns.
//!
//! Patterns are matched against the path relative to the scan root, always with
//! `/` separators. `*` stays within one path segment and `**` spans any number of
//! segments; a pattern ending in `/` matches everything below that directory.
//!
//! Symbolic links are followed. Hidden directories and directories an exclude
//! pattern covers entirely (`target/**`) are pruned, so nothing below them is
//! read.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, TmplError};

/// Include pattern used when none is configured.
pub const INCLUDE_ALL: &str = "**/**";

/// A scan root plus include and exclude patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileSet {
    /// Root directory. Relative roots are resolved by the caller.
    pub directory: PathBuf,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
}

impl Default for FileSet {
    fn default() -> Self {
        Self::new(".")
    }
}

impl FileSet {
    /// A file set covering everything under `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            includes: vec![INCLUDE_ALL.to_string()],
            excludes: Vec::new(),
        }
    }

    /// Split a comma-separated pattern list, dropping blanks.
    pub fn parse_patterns(list: &str) -> Vec<String> {
        list.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Walk the root and return every regular file selected by the patterns.
    ///
    /// Paths are returned in filesystem enumeration order. Hidden files are
    /// returned so the caller can report them; hidden directories are pruned.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        let root = &self.directory;
        if !root.is_dir() {
            return Err(TmplError::MissingRoot(root.clone()));
        }

        let includes = if self.includes.is_empty() {
            build_globset(&[INCLUDE_ALL.to_string()])?
        } else {
            build_globset(&self.includes)?
        };
        let excludes = build_globset(&self.excludes)?;
        let pruned = build_globset(&subtree_roots(&self.excludes))?;

        let walker = WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| !is_pruned(root, entry, &pruned));

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if is_not_found(&err) => {
                    tracing::warn!(
                        path = ?err.path(),
                        "skipping entry that vanished or is a dangling link"
                    );
                    continue;
                }
                Err(source) => {
                    return Err(TmplError::Walk {
                        root: root.clone(),
                        source,
                    })
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(relative) = relative_path(root, entry.path()) else {
                continue;
            };
            if includes.is_match(&relative) && !excludes.is_match(&relative) {
                files.push(entry.into_path());
            } else {
                tracing::trace!(path = %relative, "filtered out by file set patterns");
            }
        }

        Ok(files)
    }
}

/// True when any segment of a `/`-separated relative path starts with `.`.
pub fn is_hidden(relative: &str) -> bool {
    relative.split('/').any(|segment| segment.starts_with('.'))
}

/// Root-relative path of `path` with `/` separators.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Some(segments.join("/"))
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let normalized = normalize_pattern(pattern);
        let glob = GlobBuilder::new(&normalized)
            .literal_separator(true)
            .build()
            .map_err(|source| TmplError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| TmplError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// Directories whose whole subtree an exclude pattern covers: `a/b/**` yields `a/b`.
fn subtree_roots(excludes: &[String]) -> Vec<String> {
    excludes
        .iter()
        .filter_map(|pattern| {
            normalize_pattern(pattern)
                .strip_suffix("/**")
                .filter(|prefix| !prefix.is_empty())
                .map(str::to_string)
        })
        .collect()
}

fn is_pruned(root: &Path, entry: &DirEntry, subtrees: &GlobSet) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let Some(relative) = relative_path(root, entry.path()) else {
        return false;
    };
    let prune = is_hidden(&relative) || subtrees.is_match(&relative);
    if prune {
        tracing::trace!(path = %relative, "pruned directory");
    }
    prune
}

fn is_not_found(err: &walkdir::Error) -> bool {
    err.io_error()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
}

fn normalize_pattern(pattern: &str) -> String {
    let pattern = pattern.trim().replace('\\', "/");
    let pattern = pattern.trim_start_matches("./");
    if pattern.ends_with('/') {
        format!("{pattern}**")
    } else {
        pattern.to_string()
    }
}
