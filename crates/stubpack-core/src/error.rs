//! Error types for bundle building operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackError`.
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors that can occur while building a bundle.
#[derive(Error, Debug)]
pub enum PackError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Glob pattern could not be compiled.
    #[error("invalid glob pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The offending pattern text.
        pattern: String,
        /// Compilation failure reported by the regex engine.
        reason: String,
    },

    /// Base directory is missing or not a directory.
    #[error("base directory does not exist or is not a directory: {path}")]
    InvalidBaseDir {
        /// The rejected path.
        path: PathBuf,
    },

    /// Ignore-rules file could not be read.
    #[error("cannot read ignore file {path}: {reason}")]
    InvalidIgnoreFile {
        /// Path to the rules file.
        path: PathBuf,
        /// Underlying read failure.
        reason: String,
    },

    /// Compression mode string was not recognized.
    #[error("unknown compression mode: {value}")]
    InvalidCompressionMode {
        /// The rejected mode string.
        value: String,
    },

    /// The container facility failed during creation, insertion, or
    /// finalization.
    #[error("archive write failed: {0}")]
    ArchiveWrite(#[source] std::io::Error),
}

impl PackError {
    /// Returns `true` if this error came from the container facility.
    #[must_use]
    pub const fn is_archive_error(&self) -> bool {
        matches!(self, Self::ArchiveWrite(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = PackError::InvalidPattern {
            pattern: "[abc".to_string(),
            reason: "unclosed character class".to_string(),
        };
        assert!(err.to_string().contains("[abc"));

        let err = PackError::InvalidBaseDir {
            path: PathBuf::from("/no/such/dir"),
        };
        assert!(err.to_string().contains("/no/such/dir"));
    }

    #[test]
    fn test_is_archive_error() {
        let err = PackError::ArchiveWrite(std::io::Error::other("disk full"));
        assert!(err.is_archive_error());

        let err = PackError::Io(std::io::Error::other("read failed"));
        assert!(!err.is_archive_error());
    }
}
