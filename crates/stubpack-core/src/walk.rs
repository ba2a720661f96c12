//! Directory tree walking for bundle candidates.
//!
//! Enumerates every regular file strictly under a base directory,
//! exactly once each. Directories are never yielded, dotfiles are
//! included, and symlinks are followed (the walk treats a link to a
//! file like the file itself and descends into linked directories).

use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::error::PackError;
use crate::error::Result;

/// A file under consideration for bundle inclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Full filesystem path, used to read the file contents.
    pub source: PathBuf,

    /// Path relative to the base directory in OS-native form. This is
    /// the exact-match key for ignore rules and the key inserted into
    /// the bundle.
    pub relative: PathBuf,

    /// Relative path with separators normalized to `/`, the form glob
    /// rules are authored against.
    pub matchable: String,
}

/// Enumerates all regular files under `base`.
///
/// Safe to call repeatedly on the same directory; the filesystem is not
/// mutated. Traversal order is whatever the underlying iterator
/// produces and must not be relied on.
///
/// # Errors
///
/// Returns [`PackError::InvalidBaseDir`] when `base` is missing or not
/// a directory, and [`PackError::Io`] for traversal failures such as
/// unreadable subdirectories or filesystem loops.
pub fn walk(base: &Path) -> Result<Vec<Candidate>> {
    if !base.is_dir() {
        return Err(PackError::InvalidBaseDir {
            path: base.to_path_buf(),
        });
    }

    let mut candidates = Vec::new();
    for entry in WalkDir::new(base).follow_links(true) {
        let entry =
            entry.map_err(|e| PackError::Io(std::io::Error::other(format!("walk error: {e}"))))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(base)
            .map_err(|e| {
                PackError::Io(std::io::Error::other(format!(
                    "entry {} escaped base directory: {e}",
                    entry.path().display()
                )))
            })?
            .to_path_buf();
        let matchable = slash_normalized(&relative);

        candidates.push(Candidate {
            source: entry.path().to_path_buf(),
            relative,
            matchable,
        });
    }

    Ok(candidates)
}

/// Joins path components with `/` regardless of the host separator.
fn slash_normalized(relative: &Path) -> String {
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.join("/")
}
