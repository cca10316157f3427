//! Watch pattern set: which paths trigger a rebuild, and which directories
//! must be watched to see them.

use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern, PatternError};

use crate::utils::path::normalize_path;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled absolute glob patterns plus their watch roots.
#[derive(Debug, Clone)]
pub struct WatchPatterns {
    patterns: Vec<Pattern>,
    roots: Vec<PathBuf>,
}

impl WatchPatterns {
    /// Compile absolute glob patterns.
    pub fn new(patterns: &[String]) -> Result<Self, PatternError> {
        let compiled = patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let bases: Vec<PathBuf> = patterns.iter().map(|p| static_base(p)).collect();

        Ok(Self {
            patterns: compiled,
            roots: collapse_roots(bases),
        })
    }

    /// Directories to watch recursively, with nested roots removed.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// True if `path` matches any pattern.
    pub fn matches(&self, path: &Path) -> bool {
        let path = normalize_path(path);
        self.patterns
            .iter()
            .any(|pattern| pattern.matches_path_with(&path, MATCH_OPTIONS))
    }

    /// Keep only the event paths that match, dropping the event if none do.
    pub fn filter_event(&self, mut event: notify::Event) -> Option<notify::Event> {
        event.paths.retain(|path| self.matches(path));
        (!event.paths.is_empty()).then_some(event)
    }
}

/// Directory prefix of a pattern before its first glob component.
///
/// A pattern without glob characters names a single file; its parent is
/// watched so editors that save by rename are still seen.
pub fn static_base(pattern: &str) -> PathBuf {
    let path = Path::new(pattern);
    let mut base = PathBuf::new();
    let mut has_glob = false;

    for component in path.components() {
        if let Component::Normal(part) = component
            && is_glob(&part.to_string_lossy())
        {
            has_glob = true;
            break;
        }
        base.push(component);
    }

    if !has_glob && let Some(parent) = base.parent() {
        base = parent.to_path_buf();
    }
    unescape(&base)
}

fn is_glob(part: &str) -> bool {
    // `[x]` with a single char is how `Pattern::escape` quotes metacharacters
    strip_escapes(part).contains(['*', '?', '['])
}

/// Remove `[*]`, `[?]`, `[[]` and `[]]` escapes produced by `Pattern::escape`.
fn strip_escapes(part: &str) -> String {
    let mut out = String::with_capacity(part.len());
    let chars: Vec<char> = part.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '[' && i + 2 < chars.len() && chars[i + 2] == ']' {
            i += 3;
            continue;
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

fn unescape(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    let mut out = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '[' && i + 2 < chars.len() && chars[i + 2] == ']' {
            out.push(chars[i + 1]);
            i += 3;
            continue;
        }
        out.push(chars[i]);
        i += 1;
    }
    PathBuf::from(out)
}

/// Deduplicate roots and drop those nested inside another root.
fn collapse_roots(mut roots: Vec<PathBuf>) -> Vec<PathBuf> {
    roots.sort();
    roots.dedup();

    let mut collapsed: Vec<PathBuf> = Vec::with_capacity(roots.len());
    for root in roots {
        if collapsed.iter().any(|kept| root.starts_with(kept)) {
            continue;
        }
        collapsed.push(root);
    }
    collapsed
}
