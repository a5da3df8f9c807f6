// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Depth-first directory walker for mod data files.
//!
//! Recursion depth is bounded and every directory is visited at most once
//! by canonical path, so a symlink pointing back up the tree ends the
//! descent instead of recursing forever.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use punisher_core::PunisherError;
use tracing::{debug, warn};

/// Default bound on directory nesting below the walk root.
pub const DEFAULT_MAX_DEPTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Directories nested deeper than this below the root are skipped.
    pub max_depth: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Call `visit` for every file under `root` whose extension is in
/// `extensions` (with or without the leading dot, case-insensitive).
///
/// Entries are visited in file-name order. A missing root is not an error.
/// Returns the number of files visited.
pub fn walk_files<F>(
    root: &Path,
    extensions: &[&str],
    options: &WalkOptions,
    mut visit: F,
) -> Result<usize, PunisherError>
where
    F: FnMut(&Path) -> Result<(), PunisherError>,
{
    if !root.exists() {
        debug!(root = %root.display(), "walk root does not exist");
        return Ok(0);
    }

    let extensions: Vec<String> = extensions
        .iter()
        .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
        .collect();
    let mut visited = HashSet::new();
    let mut count = 0;
    walk_dir(root, 0, &extensions, options, &mut visited, &mut visit, &mut count)?;
    Ok(count)
}

/// Collect matching files instead of visiting them.
pub fn collect_files(
    root: &Path,
    extensions: &[&str],
    options: &WalkOptions,
) -> Result<Vec<PathBuf>, PunisherError> {
    let mut files = Vec::new();
    walk_files(root, extensions, options, |path| {
        files.push(path.to_path_buf());
        Ok(())
    })?;
    Ok(files)
}

fn walk_dir<F>(
    dir: &Path,
    depth: usize,
    extensions: &[String],
    options: &WalkOptions,
    visited: &mut HashSet<PathBuf>,
    visit: &mut F,
    count: &mut usize,
) -> Result<(), PunisherError>
where
    F: FnMut(&Path) -> Result<(), PunisherError>,
{
    let canonical = fs::canonicalize(dir)?;
    if !visited.insert(canonical) {
        warn!(dir = %dir.display(), "directory already visited, skipping symlink loop");
        return Ok(());
    }

    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        // `metadata` follows symlinks, so a link to a directory is walked.
        let metadata = match fs::metadata(&path) {
            Ok(m) => m,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if metadata.is_dir() {
            if depth >= options.max_depth {
                warn!(
                    dir = %path.display(),
                    max_depth = options.max_depth,
                    "directory nesting exceeds limit, skipping"
                );
                continue;
            }
            walk_dir(&path, depth + 1, extensions, options, visited, visit, count)?;
        } else if matches_extension(&path, extensions) {
            visit(&path)?;
            *count += 1;
        }
    }
    Ok(())
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}
