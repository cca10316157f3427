//! Configuration utility functions.

use std::path::{Path, PathBuf};

use crate::utils::path::strip_dot_prefix;

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/theme/scss/partials/   ← cwd
/// /home/user/theme/scsswatch.toml   ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

/// Anchor a relative glob pattern at `root`.
///
/// The root is escaped so directory names containing `[`, `*` or `?`
/// are matched literally.
pub fn absolute_pattern(root: &Path, pattern: &str) -> String {
    if Path::new(pattern).is_absolute() {
        return pattern.to_string();
    }
    let root = glob::Pattern::escape(&root.to_string_lossy());
    let pattern = strip_dot_prefix(pattern);
    format!("{}/{}", root.trim_end_matches('/'), pattern)
}
