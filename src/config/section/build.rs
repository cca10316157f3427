//! `[build]` section: entry point, destination and compiler options.
//!
//! # Example
//!
//! ```toml
//! [build]
//! entry = "scss/style.scss"
//! output = "css"
//! style = "compressed"
//! load_paths = ["node_modules"]
//! ```

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CSS output formatting, passed through to the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Expanded,
    Compressed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// The single SCSS entry point.
    pub entry: PathBuf,
    /// Directory the compiled CSS is written to.
    pub output: PathBuf,
    pub style: OutputStyle,
    /// Extra directories searched by `@use` / `@import`.
    pub load_paths: Vec<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            entry: "scss/style.scss".into(),
            output: "css".into(),
            style: OutputStyle::default(),
            load_paths: Vec::new(),
        }
    }
}

impl BuildConfig {
    /// Validate build configuration.
    ///
    /// Paths must already be resolved against the project root.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.entry.exists() {
            diag.error_with_hint(
                "build.entry",
                format!("entry file not found: {}", self.entry.display()),
                "create the file or point build.entry at your root stylesheet",
            );
        } else if !self.entry.is_file() {
            diag.error(
                "build.entry",
                format!("entry is not a file: {}", self.entry.display()),
            );
        }

        if self.output.is_file() {
            diag.error(
                "build.output",
                format!("output is a file, expected a directory: {}", self.output.display()),
            );
        }

        for path in &self.load_paths {
            if !path.is_dir() {
                diag.error(
                    "build.load_paths",
                    format!("load path is not a directory: {}", path.display()),
                );
            }
        }
    }
}
