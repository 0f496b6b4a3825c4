//! Basename filtering shared by the walker and the structure renderer.

use crate::error::SnapshotError;
use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use std::ffi::OsStr;

/// Decides whether a directory entry is left out of the snapshot.
///
/// Patterns use shell-glob syntax (`*`, `?`, `[seq]`, `[!seq]`) and are matched
/// against a single path segment, never a full relative path. Every other
/// character is literal, including `\`, `{` and `}`, and a `[` without a
/// closing `]` matches itself. Matching is case-insensitive only on Windows.
///
/// Excluded names only ever apply to files, so a directory that happens to
/// share a name with the program or its output is still walked.
#[derive(Debug, Clone)]
pub struct EntryFilter {
    patterns: GlobSet,
    excluded_names: Vec<String>,
}

impl EntryFilter {
    pub fn new<P, N>(patterns: P, excluded_names: N) -> Result<Self, SnapshotError>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            if let Some(glob) = compile(pattern.as_ref())? {
                builder.add(glob);
            }
        }
        let patterns = builder.build().map_err(|e| SnapshotError::Pattern {
            pattern: String::from("<set>"),
            source: e,
        })?;
        Ok(Self {
            patterns,
            excluded_names: excluded_names.into_iter().map(Into::into).collect(),
        })
    }

    /// True if `name` matches any ignore pattern.
    pub fn matches(&self, name: impl AsRef<OsStr>) -> bool {
        self.patterns.is_match(name.as_ref())
    }

    /// True if `name` matches an ignore pattern or is one of the excluded names.
    pub fn is_excluded(&self, name: impl AsRef<OsStr>) -> bool {
        let name = name.as_ref();
        self.matches(name) || self.excluded_names.iter().any(|n| OsStr::new(n) == name)
    }

    /// Whether an entry is skipped: directories by pattern only, files by
    /// pattern or excluded name.
    pub fn skips(&self, name: impl AsRef<OsStr>, is_dir: bool) -> bool {
        if is_dir {
            self.matches(name)
        } else {
            self.is_excluded(name)
        }
    }
}

/// Compiles one shell pattern. `None` means the pattern can never match.
fn compile(pattern: &str) -> Result<Option<Glob>, SnapshotError> {
    let Some(translated) = translate(pattern) else {
        return Ok(None);
    };
    GlobBuilder::new(&translated)
        .case_insensitive(cfg!(windows))
        .backslash_escape(false)
        .build()
        .map(Some)
        .map_err(|e| SnapshotError::Pattern {
            pattern: pattern.to_string(),
            source: e,
        })
}

/// Rewrites a shell pattern into globset syntax with the same meaning.
fn translate(pattern: &str) -> Option<String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => {
                if !out.ends_with('*') {
                    out.push('*');
                }
                i += 1;
            }
            '[' => match class_end(&chars, i + 1) {
                Some(end) => {
                    out.push_str(&translate_class(&chars[i + 1..end])?);
                    i = end + 1;
                }
                None => {
                    out.push_str("[[]");
                    i += 1;
                }
            },
            c @ ('{' | '}' | ']') => {
                out.push('[');
                out.push(c);
                out.push(']');
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    Some(out)
}

/// Index of the `]` closing a class whose body starts at `start`.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    (j < chars.len()).then_some(j)
}

/// Translates a class body. `None` means the class matches nothing.
fn translate_class(body: &[char]) -> Option<String> {
    let (negated, body) = match body.split_first() {
        Some((&'!', rest)) => (true, rest),
        _ => (false, body),
    };

    let mut ranges = Vec::new();
    let mut singles = Vec::new();
    let mut k = 0;
    while k < body.len() {
        if k + 2 < body.len() && body[k + 1] == '-' {
            // Reversed ranges are empty.
            if body[k] <= body[k + 2] {
                ranges.push((body[k], body[k + 2]));
            }
            k += 3;
        } else {
            if !singles.contains(&body[k]) {
                singles.push(body[k]);
            }
            k += 1;
        }
    }

    if ranges.is_empty() && singles.is_empty() {
        return if negated { Some("?".to_string()) } else { None };
    }

    // `]` is literal only in first position and `-` only in last.
    let has_bracket = singles.contains(&']');
    let has_dash = singles.contains(&'-');
    singles.retain(|c| *c != ']' && *c != '-');
    // A leading `!` or `^` would read as negation.
    if let Some(pos) = singles.iter().position(|c| *c != '!' && *c != '^') {
        singles.swap(0, pos);
    }

    let leads_with_negation = !negated
        && !has_bracket
        && ranges.is_empty()
        && matches!(singles.first(), Some('!' | '^'));
    if leads_with_negation && !has_dash {
        return Some(match singles.as_slice() {
            [c] => c.to_string(),
            _ => format!("{{{}}}", singles.iter().map(char::to_string).collect::<Vec<_>>().join(",")),
        });
    }

    let mut out = String::from(if negated { "[!" } else { "[" });
    if has_bracket {
        out.push(']');
    }
    if leads_with_negation {
        // A leading `-` is literal as well.
        out.push('-');
    }
    for (lo, hi) in ranges {
        out.push(lo);
        out.push('-');
        out.push(hi);
    }
    out.extend(singles);
    if has_dash && !leads_with_negation {
        out.push('-');
    }
    out.push(']');
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(patterns: &[&str]) -> EntryFilter {
        EntryFilter::new(patterns.iter().copied(), Vec::<String>::new()).unwrap()
    }

    #[test]
    fn literal_and_wildcards() {
        let f = filter(&[".git", "*.pyc", "file?.txt", "[ab]c"]);
        assert!(f.matches(".git"));
        assert!(!f.matches(".github"));
        assert!(f.matches("mod.pyc"));
        assert!(f.matches("file1.txt"));
        assert!(!f.matches("file10.txt"));
        assert!(f.matches("ac"));
        assert!(f.matches("bc"));
        assert!(!f.matches("cc"));
    }

    #[test]
    fn negated_class() {
        let f = filter(&["[!a]*"]);
        assert!(!f.matches("abc"));
        assert!(f.matches("xyz"));
    }

    #[test]
    fn ranges_and_literal_dash() {
        let f = filter(&["v[0-9]", "x[a-]"]);
        assert!(f.matches("v7"));
        assert!(!f.matches("vx"));
        assert!(f.matches("xa"));
        assert!(f.matches("x-"));
        assert!(!f.matches("xb"));
    }

    #[test]
    fn caret_is_literal_inside_class() {
        let f = filter(&["[^a]", "[^]"]);
        assert!(f.matches("^"));
        assert!(f.matches("a"));
        assert!(!f.matches("b"));
    }

    #[test]
    fn bracket_first_in_class() {
        let f = filter(&["[]x]"]);
        assert!(f.matches("]"));
        assert!(f.matches("x"));
        assert!(!f.matches("y"));
    }

    #[test]
    fn braces_are_literal() {
        let f = filter(&["{a,b}"]);
        assert!(f.matches("{a,b}"));
        assert!(!f.matches("a"));
        assert!(!f.matches("b"));
    }

    #[cfg(not(windows))]
    #[test]
    fn backslash_is_literal() {
        let f = filter(&[r"a\b"]);
        assert!(f.matches(r"a\b"));
        assert!(!f.matches("ab"));
    }

    #[test]
    fn unclosed_bracket_is_literal() {
        let f = filter(&["[draft", "x]"]);
        assert!(f.matches("[draft"));
        assert!(!f.matches("d"));
        assert!(f.matches("x]"));
    }

    #[test]
    fn repeated_stars_collapse() {
        let f = filter(&["a**b", "**"]);
        assert!(f.matches("axyzb"));
        assert!(f.matches("anything"));
    }

    #[test]
    fn reversed_range_matches_nothing() {
        let f = filter(&["[z-a]"]);
        assert!(!f.matches("m"));
        assert!(!f.matches("z"));
    }

    #[test]
    fn empty_set_matches_nothing() {
        let f = filter(&[]);
        assert!(!f.matches("anything"));
        assert!(!f.is_excluded("anything"));
    }

    #[cfg(not(windows))]
    #[test]
    fn case_sensitive_on_unix() {
        let f = filter(&["*.LOG"]);
        assert!(f.matches("a.LOG"));
        assert!(!f.matches("a.log"));
    }

    #[test]
    fn excluded_names_are_exact() {
        let f = EntryFilter::new(Vec::<String>::new(), ["dirsnap", "directory_snapshot.json"]).unwrap();
        assert!(f.is_excluded("dirsnap"));
        assert!(f.is_excluded("directory_snapshot.json"));
        assert!(!f.is_excluded("dirsnap.rs"));
        assert!(!f.matches("dirsnap"));
    }

    #[test]
    fn excluded_names_skip_files_only() {
        let f = EntryFilter::new([".git"], ["dirsnap"]).unwrap();
        assert!(f.skips("dirsnap", false));
        assert!(!f.skips("dirsnap", true));
        assert!(f.skips(".git", true));
        assert!(f.skips(".git", false));
    }
}
