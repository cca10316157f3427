//! Path normalization utilities.

use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Strip a leading `./` (repeated) from a relative path or pattern.
///
/// `root.join("./scss/**")` keeps the `.` component, which never matches
/// the canonical paths reported by the watcher.
pub fn strip_dot_prefix(pattern: &str) -> &str {
    let mut rest = pattern;
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped.trim_start_matches('/');
    }
    rest
}

/// Get `path` relative to `root` for display, or the path unchanged.
pub fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_relative() {
        let normalized = normalize_path(Path::new("relative/path/file.scss"));
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_strip_dot_prefix() {
        assert_eq!(strip_dot_prefix("./scss/**/*.scss"), "scss/**/*.scss");
        assert_eq!(strip_dot_prefix("././html/*.html"), "html/*.html");
        assert_eq!(strip_dot_prefix("scss/style.scss"), "scss/style.scss");
        assert_eq!(strip_dot_prefix("../shared/*.scss"), "../shared/*.scss");
    }

    #[test]
    fn test_display_relative() {
        let root = Path::new("/project");
        assert_eq!(
            display_relative(Path::new("/project/css/style.css"), root),
            "css/style.css"
        );
        assert_eq!(display_relative(Path::new("/elsewhere/a.css"), root), "/elsewhere/a.css");
    }
}
