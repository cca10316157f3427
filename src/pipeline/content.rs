//! Purge content set: names referenced by HTML files.
//!
//! Every tag name, class and id found in the matched files counts as used.
//! Markup is parsed with `tl`; text content, including inline scripts, is
//! not scanned.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

use super::purge::PurgeError;

/// Tag names, classes and ids referenced by the content set.
#[derive(Debug, Default)]
pub struct UsedNames {
    tags: FxHashSet<String>,
    classes: FxHashSet<String>,
    ids: FxHashSet<String>,
    /// Names that count as used in any position.
    safelist: FxHashSet<String>,
}

impl UsedNames {
    /// Scan every file matched by `patterns` (absolute glob patterns).
    ///
    /// Returns the names and the number of files read.
    pub fn collect(patterns: &[String]) -> Result<(Self, usize), PurgeError> {
        let mut used = Self::default();
        let mut files = 0;

        for path in expand_patterns(patterns)? {
            let html = std::fs::read_to_string(&path)
                .map_err(|source| PurgeError::Read { path: path.clone(), source })?;
            used.add_html(&path, &html)?;
            files += 1;
        }

        if files == 0 {
            crate::debug!("purge"; "no content files matched {:?}", patterns);
        }

        Ok((used, files))
    }

    /// Record the names used by one HTML document.
    pub fn add_html(&mut self, path: &Path, html: &str) -> Result<(), PurgeError> {
        let dom = tl::parse(html, tl::ParserOptions::default()).map_err(|err| PurgeError::Html {
            path: path.to_path_buf(),
            message: format!("{err:?}"),
        })?;

        for node in dom.nodes() {
            let Some(tag) = node.as_tag() else {
                continue;
            };

            self.tags
                .insert(tag.name().as_utf8_str().to_ascii_lowercase());

            let attributes = tag.attributes();
            if let Some(Some(class)) = attributes.get("class") {
                self.classes.extend(
                    class
                        .as_utf8_str()
                        .split_ascii_whitespace()
                        .map(str::to_string),
                );
            }
            if let Some(Some(id)) = attributes.get("id") {
                let id = id.as_utf8_str();
                let id = id.trim();
                if !id.is_empty() {
                    self.ids.insert(id.to_string());
                }
            }
        }

        Ok(())
    }

    pub fn extend_safelist<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.safelist.extend(names.into_iter().map(Into::into));
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.contains(name) || self.safelist.contains(name)
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains(name) || self.safelist.contains(name)
    }

    pub fn has_id(&self, name: &str) -> bool {
        self.ids.contains(name) || self.safelist.contains(name)
    }
}

/// Expand glob patterns into a sorted, deduplicated file list.
fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>, PurgeError> {
    let mut files = Vec::new();

    for pattern in patterns {
        let paths = glob::glob(pattern).map_err(|source| PurgeError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;

        for entry in paths {
            let path = entry.map_err(|err| PurgeError::Read {
                path: err.path().to_path_buf(),
                source: err.into(),
            })?;
            if path.is_file() {
                files.push(path);
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}
