//! Ignore rule loading and candidate filtering.
//!
//! A rule set is an ordered list of entries that are both literal paths
//! and glob patterns at once: a candidate is excluded when its OS-native
//! relative path string-equals any entry, or when its slash-normalized
//! relative path matches any entry compiled as a glob. The two-pass
//! order lets a rules file mix literal exclusions with patterns without
//! escaping the literals.

use std::fs;
use std::path::Path;

use crate::error::PackError;
use crate::error::Result;
use crate::glob::MatchFlags;
use crate::glob::Matcher;
use crate::walk::Candidate;

/// Convention file inside the base directory. When present, its
/// contents replace any caller-supplied rule list.
pub const IGNORE_FILE: &str = "pack.ignore";

/// An ordered set of ignore rules with pre-compiled glob matchers.
///
/// Matchers are compiled once at load time; the same rule set is tested
/// against every file in the tree, so per-candidate compilation would
/// be wasted work.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: Vec<Rule>,
}

#[derive(Debug, Clone)]
struct Rule {
    text: String,
    matcher: Matcher,
}

impl IgnoreRules {
    /// Builds a rule set from raw entries, in order.
    ///
    /// Entries are kept verbatim; empty strings become literal rules
    /// that only an empty relative path could match.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::InvalidPattern`] if any entry fails to
    /// compile as a glob.
    pub fn from_entries<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let rules = entries
            .iter()
            .map(|entry| {
                let text = entry.as_ref().to_string();
                let matcher = Matcher::compile(&text, MatchFlags::default())?;
                Ok(Rule { text, matcher })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Loads newline-separated rules from a file.
    ///
    /// Lines are not trimmed and blank lines are not skipped; they load
    /// as literal entries exactly as authored.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::InvalidIgnoreFile`] if the file cannot be
    /// read, or [`PackError::InvalidPattern`] for an uncompilable line.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| PackError::InvalidIgnoreFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let lines: Vec<&str> = contents.split('\n').collect();
        Self::from_entries(&lines)
    }

    /// Resolves the effective rule set for `base_dir`.
    ///
    /// A `pack.ignore` file directly inside the base directory replaces
    /// the caller-supplied entries entirely; otherwise the caller's
    /// entries are used.
    ///
    /// # Errors
    ///
    /// Propagates load and compile failures from either source.
    pub fn for_base<S: AsRef<str>>(base_dir: &Path, caller_entries: &[S]) -> Result<Self> {
        let convention = base_dir.join(IGNORE_FILE);
        if convention.is_file() {
            Self::from_file(&convention)
        } else {
            Self::from_entries(caller_entries)
        }
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` when the set holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Decides whether `candidate` is excluded.
    ///
    /// Returns the text of the first matching rule, or `None` when the
    /// candidate should be included. Exact string comparison against
    /// the OS-native relative path runs first for every rule, then each
    /// rule is tried as a glob against the slash-normalized form.
    #[must_use]
    pub fn evaluate(&self, candidate: &Candidate) -> Option<&str> {
        for rule in &self.rules {
            if candidate.relative.as_os_str() == std::ffi::OsStr::new(&rule.text) {
                return Some(&rule.text);
            }
        }
        for rule in &self.rules {
            if rule.matcher.is_match(&candidate.matchable) {
                return Some(&rule.text);
            }
        }
        None
    }
}
