/*!
 * Ignore rules loaded from the root of the scanned directory
 *
 * A rule starting with `/` is matched against the whole path relative to the
 * root; any other rule is matched against the bare entry name, so it applies
 * at every depth. Rules are shell-style globs where `*` also crosses `/`.
 */

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};
use log::debug;

use crate::error::{CtxError, Result};

/// A single compiled rule
#[derive(Debug, Clone)]
struct Rule {
    /// Matched against the relative path instead of the name
    rooted: bool,
    matcher: GlobMatcher,
}

/// Rewrite `{` and `}` outside character classes as one-character classes,
/// so they match themselves instead of starting an alternation.
fn literal_braces(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len());
    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' => out.push_str("[{]"),
            '}' => out.push_str("[}]"),
            '[' => {
                out.push('[');
                if let Some(&neg) = chars.peek() {
                    if neg == '!' || neg == '^' {
                        out.push(neg);
                        chars.next();
                    }
                }
                // A `]` right after the opening bracket is a member, not the end.
                if let Some(&']') = chars.peek() {
                    out.push(']');
                    chars.next();
                }
                for member in chars.by_ref() {
                    out.push(member);
                    if member == ']' {
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}

impl Rule {
    /// Compile a stored pattern; `None` when the glob is malformed
    fn compile(pattern: &str) -> Option<Self> {
        let (rooted, glob) = match pattern.strip_prefix('/') {
            Some(_) => (true, pattern.trim_start_matches('/')),
            None => (false, pattern),
        };

        let compiled = GlobBuilder::new(&literal_braces(glob))
            .literal_separator(false)
            .backslash_escape(false)
            .case_insensitive(cfg!(windows))
            .build();

        match compiled {
            Ok(glob) => Some(Self {
                rooted,
                matcher: glob.compile_matcher(),
            }),
            Err(e) => {
                debug!("Ignoring malformed pattern {:?}: {}", pattern, e);
                None
            }
        }
    }

    fn matches(&self, rel_path: &str, name: &str) -> bool {
        if self.rooted {
            self.matcher.is_match(rel_path)
        } else {
            self.matcher.is_match(name)
        }
    }
}

/// Set of exclusion patterns for one scan root
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    /// Patterns as written in the rules file, after trimming
    patterns: HashSet<String>,
    /// Compiled form of every well-formed pattern
    rules: Vec<Rule>,
    /// Exact root-relative paths that are always skipped
    reserved: HashSet<String>,
}

impl IgnoreRules {
    /// Load `file_name` from `root`. A missing file yields an empty rule set.
    pub fn load(root: &Path, file_name: &Path) -> Result<Self> {
        let path = root.join(file_name);
        if !path.is_file() {
            debug!("No ignore file at {}", path.display());
            return Ok(Self::default());
        }

        let bytes = fs::read(&path).map_err(|source| CtxError::IgnoreFile {
            path: path.clone(),
            source,
        })?;
        let rules = Self::parse(&String::from_utf8_lossy(&bytes));
        debug!(
            "Loaded {} ignore patterns from {}",
            rules.len(),
            path.display()
        );
        Ok(rules)
    }

    /// Build rules from the text of a rules file
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| line.trim_end_matches(['/', '\\']))
            .collect()
    }

    /// Always skip the entry at this exact root-relative path
    pub fn reserve(mut self, rel_path: impl Into<String>) -> Self {
        self.reserved.insert(rel_path.into());
        self
    }

    /// Add one pattern; duplicates collapse
    pub fn insert(&mut self, pattern: impl Into<String>) {
        let pattern = pattern.into();
        if self.patterns.contains(&pattern) {
            return;
        }
        if let Some(rule) = Rule::compile(&pattern) {
            self.rules.push(rule);
        }
        self.patterns.insert(pattern);
    }

    /// Stored patterns, in no particular order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether an entry with this relative path and name is excluded
    pub fn is_ignored(&self, rel_path: &str, name: &str) -> bool {
        self.reserved.contains(rel_path) || self.rules.iter().any(|r| r.matches(rel_path, name))
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreRules {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut rules = Self::default();
        for pattern in iter {
            rules.insert(pattern);
        }
        rules
    }
}
