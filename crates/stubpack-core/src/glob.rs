//! Shell-glob to regex translation for ignore matching.
//!
//! A pattern is rewritten token by token into a fully anchored regular
//! expression: `*` spans anything (or anything but `/` in path mode),
//! `?` spans exactly one character, `[...]` becomes a character class
//! with `[!...]` negated, and backslash forces the next character to be
//! taken literally unless escaping is disabled. Everything else is
//! escaped for the regex engine before being emitted.

use regex::RegexBuilder;

use crate::error::PackError;
use crate::error::Result;

/// Matching options, all independent and off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MatchFlags {
    /// `*` must not cross path-separator (`/`) boundaries.
    pub path_mode: bool,

    /// Backslash is an ordinary character, not an escape.
    pub no_escape: bool,

    /// A candidate starting with `.` only matches a pattern that
    /// starts with a literal `.`.
    pub period_sensitive: bool,

    /// Ignore letter case when matching.
    pub case_fold: bool,
}

impl MatchFlags {
    /// Sets `path_mode`.
    #[must_use]
    pub const fn with_path_mode(mut self, value: bool) -> Self {
        self.path_mode = value;
        self
    }

    /// Sets `no_escape`.
    #[must_use]
    pub const fn with_no_escape(mut self, value: bool) -> Self {
        self.no_escape = value;
        self
    }

    /// Sets `period_sensitive`.
    #[must_use]
    pub const fn with_period_sensitive(mut self, value: bool) -> Self {
        self.period_sensitive = value;
        self
    }

    /// Sets `case_fold`.
    #[must_use]
    pub const fn with_case_fold(mut self, value: bool) -> Self {
        self.case_fold = value;
        self
    }
}

/// A compiled glob matcher.
///
/// The compiled expression is anchored at both ends: a match means the
/// whole candidate string matches the pattern, never a substring.
///
/// # Examples
///
/// ```
/// use stubpack_core::glob::{MatchFlags, Matcher};
///
/// let m = Matcher::compile("src/*.rs", MatchFlags::default()).unwrap();
/// assert!(m.is_match("src/lib.rs"));
/// assert!(!m.is_match("src/lib.rs.bak"));
/// ```
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: String,
    flags: MatchFlags,
    regex: regex::Regex,
}

impl Matcher {
    /// Compiles `pattern` under `flags`.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::InvalidPattern`] when the rewritten
    /// expression is rejected by the regex engine, e.g. for an
    /// unbalanced `[`.
    pub fn compile(pattern: &str, flags: MatchFlags) -> Result<Self> {
        let source = translate(pattern, flags);
        let regex = RegexBuilder::new(&source)
            .case_insensitive(flags.case_fold)
            .build()
            .map_err(|e| PackError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            pattern: pattern.to_string(),
            flags,
            regex,
        })
    }

    /// Returns the original pattern text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Tests `candidate` against the compiled pattern.
    ///
    /// Under `period_sensitive`, a candidate with a leading `.` fails
    /// outright unless the pattern also starts with `.`; the regex is
    /// never consulted in that case.
    #[must_use]
    pub fn is_match(&self, candidate: &str) -> bool {
        if self.flags.period_sensitive
            && candidate.starts_with('.')
            && !self.pattern.starts_with('.')
        {
            return false;
        }
        self.regex.is_match(candidate)
    }
}

/// Rewrites a glob pattern into an anchored regex source string.
fn translate(pattern: &str, flags: MatchFlags) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push('^');

    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str(if flags.path_mode { "[^/]*" } else { ".*" }),
            '?' => out.push('.'),
            '[' => {
                out.push('[');
                if chars.peek() == Some(&'!') {
                    chars.next();
                    out.push('^');
                }
            }
            // Emitted raw so it closes an open class; outside a class a
            // bare `]` is a regex literal.
            ']' => out.push(']'),
            '\\' if !flags.no_escape => match chars.next() {
                Some(next) => push_literal(&mut out, next),
                None => push_literal(&mut out, '\\'),
            },
            other => push_literal(&mut out, other),
        }
    }

    out.push('$');
    out
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn matches(pattern: &str, candidate: &str) -> bool {
        Matcher::compile(pattern, MatchFlags::default())
            .unwrap()
            .is_match(candidate)
    }

    #[test]
    fn test_plain_pattern_is_exact_equality() {
        assert!(matches("secret.txt", "secret.txt"));
        assert!(!matches("secret.txt", "src/secret.txt"));
        assert!(!matches("secret.txt", "secret_txt"));
        assert!(!matches("secret.txt", "secretxtxt"));
    }

    #[test]
    fn test_star_spans_separators_by_default() {
        assert!(matches("build/*", "build/output.o"));
        assert!(matches("build/*", "build/sub/deep.o"));
        assert!(matches("*.log", "nested/dir/trace.log"));
    }

    #[test]
    fn test_star_respects_path_mode() {
        let flags = MatchFlags::default().with_path_mode(true);
        let m = Matcher::compile("build/*", flags).unwrap();
        assert!(m.is_match("build/output.o"));
        assert!(!m.is_match("build/sub/deep.o"));
    }

    #[test]
    fn test_question_mark_matches_exactly_one() {
        assert!(matches("a?c", "abc"));
        assert!(!matches("a?c", "ac"));
        assert!(!matches("a?c", "abbc"));
    }

    #[test]
    fn test_character_class() {
        assert!(matches("file.[ch]", "file.c"));
        assert!(matches("file.[ch]", "file.h"));
        assert!(!matches("file.[ch]", "file.o"));
    }

    #[test]
    fn test_negated_character_class() {
        assert!(matches("[!abc]", "d"));
        assert!(!matches("[!abc]", "a"));
        assert!(!matches("[!abc]", "b"));
        assert!(!matches("[!abc]", "c"));
        assert!(!matches("[!abc]", "dd"));
    }

    #[test]
    fn test_escape_forces_literal() {
        assert!(matches(r"\*.txt", "*.txt"));
        assert!(!matches(r"\*.txt", "a.txt"));
    }

    #[test]
    fn test_no_escape_flag() {
        let flags = MatchFlags::default().with_no_escape(true);
        let m = Matcher::compile(r"\*", flags).unwrap();
        assert!(m.is_match(r"\anything"));
        assert!(!m.is_match("anything"));
    }

    #[test]
    fn test_period_sensitive() {
        let flags = MatchFlags::default().with_period_sensitive(true);
        let star = Matcher::compile("*", flags).unwrap();
        assert!(!star.is_match(".env"));
        assert!(star.is_match("env"));

        let dot_star = Matcher::compile(".*", flags).unwrap();
        assert!(dot_star.is_match(".env"));
    }

    #[test]
    fn test_case_fold() {
        let flags = MatchFlags::default().with_case_fold(true);
        let m = Matcher::compile("README.*", flags).unwrap();
        assert!(m.is_match("readme.md"));
        assert!(m.is_match("README.MD"));

        assert!(!matches("README.*", "readme.md"));
    }

    #[test]
    fn test_empty_pattern_matches_only_empty() {
        assert!(matches("", ""));
        assert!(!matches("", "a"));
    }

    #[test]
    fn test_anchored_not_substring() {
        assert!(!matches("*.log", "trace.log.bak"));
        assert!(!matches("build", "prebuild"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert!(matches("a+b", "a+b"));
        assert!(!matches("a+b", "aab"));
        assert!(matches("v1.2(beta)", "v1.2(beta)"));
        assert!(!matches("v1.2(beta)", "v1x2(beta)"));
    }

    #[test]
    fn test_unbalanced_bracket_is_compile_error() {
        let err = Matcher::compile("[abc", MatchFlags::default()).unwrap_err();
        assert!(matches!(err, PackError::InvalidPattern { .. }));
    }

    #[test]
    fn test_trailing_backslash() {
        assert!(matches("dir\\", "dir\\"));
    }
}
