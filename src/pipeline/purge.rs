//! Unused-rule removal.
//!
//! The compiled stylesheet is parsed with lightningcss; style rules are
//! filtered selector by selector against the names used by the content set,
//! then the sheet is printed back.
//!
//! ```text
//! .a, .b { color: red }   +   <div class="a">   →   .a { color: red }
//! ```
//!
//! Grouping rules (`@media`, `@supports`, `@layer`, `@container`) are
//! filtered recursively and dropped once empty. Other at-rules are kept.
//!
//! Only markup is scanned: a class that appears solely in inline `<script>`
//! text (e.g. toggled with `classList.add`) is not seen. List such names in
//! `purge.safelist` to keep their rules.

use std::path::PathBuf;

use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use thiserror::Error;

use super::content::UsedNames;
use super::selector::selector_is_used;
use crate::config::StyleConfig;

#[derive(Debug, Error)]
pub enum PurgeError {
    #[error("invalid content pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to read content file `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse content file `{}`: {message}", path.display())]
    Html { path: PathBuf, message: String },

    #[error("failed to parse compiled CSS: {0}")]
    Parse(String),

    #[error("failed to print purged CSS: {0}")]
    Print(String),
}

/// Selector counts for one purge pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PurgeStats {
    pub kept: usize,
    pub removed: usize,
}

/// Output of one purge pass.
#[derive(Debug)]
pub struct Purged {
    pub css: String,
    pub stats: PurgeStats,
}

/// Removes CSS rules not referenced by the purge content set.
pub struct RulePurger {
    /// Absolute glob patterns, re-expanded on every pass.
    patterns: Vec<String>,
    safelist: Vec<String>,
    minify: bool,
}

impl RulePurger {
    pub fn new(patterns: Vec<String>, safelist: Vec<String>, minify: bool) -> Self {
        Self {
            patterns,
            safelist,
            minify,
        }
    }

    pub fn from_config(config: &StyleConfig) -> Self {
        Self::new(
            config.purge_patterns(),
            config.purge.safelist.clone(),
            config.build.style == crate::config::OutputStyle::Compressed,
        )
    }

    /// Read the content set and purge `css` against it.
    pub fn purge(&self, css: &str) -> Result<Purged, PurgeError> {
        let (mut used, files) = UsedNames::collect(&self.patterns)?;
        used.extend_safelist(self.safelist.iter().cloned());
        crate::debug!("purge"; "scanned {}", crate::utils::format::plural_count(files, "content file"));

        purge_css(css, &used, self.minify)
    }
}

/// Purge `css` against an already collected set of used names.
pub fn purge_css(css: &str, used: &UsedNames, minify: bool) -> Result<Purged, PurgeError> {
    let mut sheet = StyleSheet::parse(css, ParserOptions::default())
        .map_err(|err| PurgeError::Parse(err.to_string()))?;

    let mut stats = PurgeStats::default();
    retain_used_rules(&mut sheet.rules.0, used, &mut stats);

    let printed = sheet
        .to_css(PrinterOptions {
            minify,
            ..PrinterOptions::default()
        })
        .map_err(|err| PurgeError::Print(err.to_string()))?;

    Ok(Purged {
        css: printed.code,
        stats,
    })
}

fn retain_used_rules(rules: &mut Vec<CssRule<'_>>, used: &UsedNames, stats: &mut PurgeStats) {
    rules.retain_mut(|rule| match rule {
        CssRule::Style(style) => {
            style.selectors.0.retain(|selector| {
                let keep = selector_is_used(selector, used);
                if keep {
                    stats.kept += 1;
                } else {
                    stats.removed += 1;
                }
                keep
            });
            !style.selectors.0.is_empty()
        }
        CssRule::Media(media) => {
            retain_used_rules(&mut media.rules.0, used, stats);
            !media.rules.0.is_empty()
        }
        CssRule::Supports(supports) => {
            retain_used_rules(&mut supports.rules.0, used, stats);
            !supports.rules.0.is_empty()
        }
        CssRule::LayerBlock(layer) => {
            retain_used_rules(&mut layer.rules.0, used, stats);
            !layer.rules.0.is_empty()
        }
        CssRule::Container(container) => {
            retain_used_rules(&mut container.rules.0, used, stats);
            !container.rules.0.is_empty()
        }
        _ => true,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn used_from(html: &str) -> UsedNames {
        let mut used = UsedNames::default();
        used.add_html(Path::new("index.html"), html).unwrap();
        used
    }

    #[test]
    fn test_unreferenced_rule_removed() {
        let used = used_from(r#"<div class="a"></div>"#);
        let purged = purge_css(".a { color: red; }\n.b { color: blue; }", &used, false).unwrap();

        assert!(purged.css.contains(".a"));
        assert!(!purged.css.contains(".b"));
        assert_eq!(purged.stats, PurgeStats { kept: 1, removed: 1 });
    }

    #[test]
    fn test_selector_list_partially_kept() {
        let used = used_from(r#"<p class="a"></p>"#);
        let purged = purge_css(".a, .b { margin: 0; }", &used, false).unwrap();

        assert!(purged.css.contains(".a"));
        assert!(!purged.css.contains(".b"));
        assert!(purged.css.contains("margin: 0"));
    }

    #[test]
    fn test_namespaced_type_selector_removed() {
        let used = used_from(r#"<div class="a"></div>"#);
        let purged = purge_css("*|section { color: red; }\n*|div { top: 0; }", &used, true).unwrap();

        assert!(!purged.css.contains("section"));
        assert!(purged.css.contains("div"));
        assert_eq!(purged.stats, PurgeStats { kept: 1, removed: 1 });
    }

    #[test]
    fn test_empty_media_dropped() {
        let used = used_from(r#"<p class="a"></p>"#);
        let css = "@media (min-width: 600px) { .b { color: red; } }\n\
                   @media print { .a { color: black; } }";
        let purged = purge_css(css, &used, false).unwrap();

        assert!(!purged.css.contains("min-width"));
        assert!(purged.css.contains("@media print"));
        assert!(purged.css.contains(".a"));
    }

    #[test]
    fn test_keyframes_and_font_face_kept() {
        let used = used_from("<div></div>");
        let css = "@keyframes spin { from { opacity: 0; } to { opacity: 1; } }\n\
                   @font-face { font-family: Demo; src: url(demo.woff2); }\n\
                   .unused { animation: spin 1s; }";
        let purged = purge_css(css, &used, false).unwrap();

        assert!(purged.css.contains("@keyframes spin"));
        assert!(purged.css.contains("@font-face"));
        assert!(!purged.css.contains(".unused"));
    }

    #[test]
    fn test_nameless_selectors_kept() {
        let used = UsedNames::default();
        let purged = purge_css(":root { --x: 1; }\n* { box-sizing: border-box; }", &used, false)
            .unwrap();

        assert!(purged.css.contains(":root"));
        assert!(purged.css.contains("box-sizing"));
        assert_eq!(purged.stats.removed, 0);
    }

    #[test]
    fn test_purger_reads_content_each_pass() {
        let temp = TempDir::new().unwrap();
        let html = temp.path().join("index.html");
        fs::write(&html, r#"<div class="a"></div>"#).unwrap();

        let purger = RulePurger::new(
            vec![format!("{}/*.html", temp.path().display())],
            Vec::new(),
            false,
        );
        let css = ".a { color: red; }\n.b { color: blue; }";

        let first = purger.purge(css).unwrap();
        assert!(!first.css.contains(".b"));

        fs::write(&html, r#"<div class="a b"></div>"#).unwrap();
        let second = purger.purge(css).unwrap();
        assert!(second.css.contains(".b"));
    }

    #[test]
    fn test_safelist_keeps_rule() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("index.html"), "<div></div>").unwrap();

        let purger = RulePurger::new(
            vec![format!("{}/*.html", temp.path().display())],
            vec!["is-open".into()],
            false,
        );
        let purged = purger.purge(".is-open { display: block; }").unwrap();
        assert!(purged.css.contains(".is-open"));
    }
}
