//! Error conversion utilities for CLI.
//!
//! Converts stubpack-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use stubpack_core::PackError;

/// Converts `PackError` to a user-friendly anyhow error with context
pub fn convert_pack_error(err: PackError, base: &Path, output: &Path) -> anyhow::Error {
    match err {
        PackError::InvalidBaseDir { path } => {
            anyhow!(
                "input directory '{}' does not exist or is not a directory\n\
                 HINT: Check the --in argument.",
                path.display()
            )
        }
        PackError::InvalidPattern { pattern, reason } => {
            anyhow!(
                "ignore rule `{pattern}` is not a valid glob: {reason}\n\
                 HINT: Escape literal glob characters with a backslash."
            )
        }
        PackError::InvalidIgnoreFile { path, reason } => {
            anyhow!("cannot read ignore file '{}': {reason}", path.display())
        }
        PackError::ArchiveWrite(io_err) => {
            anyhow!(
                "failed writing bundle '{}': {io_err}\n\
                 HINT: Check free space and permissions on the output directory.",
                output.display()
            )
        }
        _ => anyhow::Error::from(err)
            .context(format!("error packaging directory '{}'", base.display())),
    }
}
