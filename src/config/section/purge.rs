//! `[purge]` section: unused-rule removal against HTML sources.
//!
//! # Example
//!
//! ```toml
//! [purge]
//! enable = true
//! content = ["html/*.html"]
//! safelist = ["is-active", "modal-open"]
//! ```
//!
//! Enabling purge also adds `content` to the watch pattern set, so editing
//! markup re-runs the build.

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PurgeConfig {
    pub enable: bool,
    /// Glob patterns of HTML files scanned for used tags, classes and ids.
    pub content: Vec<String>,
    /// Names that always count as used (classes toggled by scripts, etc).
    pub safelist: Vec<String>,
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            enable: false,
            content: vec!["html/*.html".into()],
            safelist: Vec::new(),
        }
    }
}

impl PurgeConfig {
    /// Validate purge configuration (only when enabled).
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }

        if self.content.is_empty() {
            diag.error_with_hint(
                "purge.content",
                "purge.enable is true but purge.content is empty",
                "every rule would be removed; add the HTML files that use your styles",
            );
        }

        for pattern in &self.content {
            if let Err(err) = glob::Pattern::new(pattern) {
                diag.error("purge.content", format!("invalid pattern `{pattern}`: {err}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(!config.purge.enable);
        assert_eq!(config.purge.content, vec!["html/*.html"]);
        assert!(config.purge.safelist.is_empty());
    }

    #[test]
    fn test_enabled_with_safelist() {
        let config = test_parse_config(
            r#"
[purge]
enable = true
content = ["pages/**/*.html"]
safelist = ["is-open"]
"#,
        );
        assert!(config.purge.enable);
        assert_eq!(config.purge.content, vec!["pages/**/*.html"]);
        assert_eq!(config.purge.safelist, vec!["is-open"]);
    }

    #[test]
    fn test_disabled_skips_validation() {
        let purge = PurgeConfig {
            enable: false,
            content: vec!["[".into()],
            safelist: Vec::new(),
        };
        let mut diag = ConfigDiagnostics::new();
        purge.validate(&mut diag);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_invalid_pattern_reported() {
        let purge = PurgeConfig {
            enable: true,
            content: vec!["html/[.html".into()],
            safelist: Vec::new(),
        };
        let mut diag = ConfigDiagnostics::new();
        purge.validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field, "purge.content");
    }
}
