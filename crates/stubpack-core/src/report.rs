//! Build operation reporting.

use std::path::PathBuf;
use std::time::Duration;

/// A file excluded by an ignore rule, with the rule that matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredEntry {
    /// Relative path of the excluded file.
    pub path: PathBuf,

    /// Text of the first rule that matched it.
    pub rule: String,
}

/// Report of a bundle build.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Number of files inserted into the bundle.
    pub files_added: usize,

    /// Files excluded by ignore rules, in walk order.
    pub ignored: Vec<IgnoredEntry>,

    /// Whether an existing output file was deleted first.
    pub overwrote: bool,

    /// Whether a compression pass ran (`--compress none` counts as a
    /// pass that ran but left the payload uncompressed).
    pub compressed: bool,

    /// Wall-clock duration of the build.
    pub duration: Duration,
}

impl BuildReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files excluded by ignore rules.
    #[must_use]
    pub fn files_ignored(&self) -> usize {
        self.ignored.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_default() {
        let report = BuildReport::new();
        assert_eq!(report.files_added, 0);
        assert_eq!(report.files_ignored(), 0);
        assert!(!report.overwrote);
        assert!(!report.compressed);
        assert_eq!(report.duration, Duration::default());
    }

    #[test]
    fn test_files_ignored_counts_entries() {
        let mut report = BuildReport::new();
        report.ignored.push(IgnoredEntry {
            path: PathBuf::from("a.log"),
            rule: "*.log".to_string(),
        });
        report.ignored.push(IgnoredEntry {
            path: PathBuf::from("b.log"),
            rule: "*.log".to_string(),
        });
        assert_eq!(report.files_ignored(), 2);
    }
}
