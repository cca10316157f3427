//! SCSS compilation.
//!
//! Uses [`grass`] under the hood. The entry's own directory is always on the
//! load path, so `@use "partials/buttons"` resolves next to the entry.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{BuildConfig, OutputStyle};

/// A syntax or resolution error reported by the compiler.
#[derive(Debug, Error)]
#[error("compile error in {}", entry.display())]
pub struct CompileError {
    pub entry: PathBuf,
    #[source]
    source: Box<grass::Error>,
}

impl CompileError {
    /// The compiler's own message, including the source excerpt.
    pub fn detail(&self) -> String {
        self.source.to_string()
    }
}

/// SCSS compiler.
pub struct StyleCompiler {
    style: OutputStyle,
    load_paths: Vec<PathBuf>,
}

impl StyleCompiler {
    pub fn new(config: &BuildConfig) -> Self {
        Self {
            style: config.style,
            load_paths: config.load_paths.clone(),
        }
    }

    fn options(&self, entry: &Path) -> grass::Options<'static> {
        let style = match self.style {
            OutputStyle::Expanded => grass::OutputStyle::Expanded,
            OutputStyle::Compressed => grass::OutputStyle::Compressed,
        };

        let mut options = grass::Options::default().style(style);
        if let Some(parent) = entry.parent() {
            options = options.load_path(parent);
        }
        for path in &self.load_paths {
            options = options.load_path(path);
        }
        options
    }

    /// Compile one SCSS entry file to CSS.
    pub fn compile(&self, entry: &Path) -> Result<String, CompileError> {
        grass::from_path(entry, &self.options(entry)).map_err(|source| CompileError {
            entry: entry.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn compiler(style: OutputStyle) -> StyleCompiler {
        StyleCompiler::new(&BuildConfig {
            style,
            ..BuildConfig::default()
        })
    }

    #[test]
    fn test_compile_nested_rules() {
        let temp = TempDir::new().unwrap();
        let entry = temp.path().join("style.scss");
        fs::write(&entry, ".card { .title { color: #000; } }").unwrap();

        let css = compiler(OutputStyle::Expanded).compile(&entry).unwrap();
        assert!(css.contains(".card .title"));
    }

    #[test]
    fn test_compile_resolves_partials_next_to_entry() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("partials")).unwrap();
        fs::write(
            temp.path().join("partials/_buttons.scss"),
            "$accent: red;\n.btn { color: $accent; }",
        )
        .unwrap();
        let entry = temp.path().join("style.scss");
        fs::write(&entry, "@use \"partials/buttons\";").unwrap();

        let css = compiler(OutputStyle::Expanded).compile(&entry).unwrap();
        assert!(css.contains(".btn"));
        assert!(css.contains("red"));
    }

    #[test]
    fn test_compile_uses_extra_load_paths() {
        let temp = TempDir::new().unwrap();
        let vendor = temp.path().join("vendor");
        fs::create_dir_all(&vendor).unwrap();
        fs::write(vendor.join("_reset.scss"), "body { margin: 0; }").unwrap();
        let entry = temp.path().join("scss/style.scss");
        fs::create_dir_all(entry.parent().unwrap()).unwrap();
        fs::write(&entry, "@use \"reset\";").unwrap();

        let compiler = StyleCompiler::new(&BuildConfig {
            load_paths: vec![vendor],
            ..BuildConfig::default()
        });
        let css = compiler.compile(&entry).unwrap();
        assert!(css.contains("margin: 0"));
    }

    #[test]
    fn test_compressed_output() {
        let temp = TempDir::new().unwrap();
        let entry = temp.path().join("style.scss");
        fs::write(&entry, ".a {\n  color: red;\n}\n").unwrap();

        let css = compiler(OutputStyle::Compressed).compile(&entry).unwrap();
        assert!(css.contains(".a{color:red}"));
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let temp = TempDir::new().unwrap();
        let entry = temp.path().join("style.scss");
        fs::write(&entry, ".btn { color: red;").unwrap();

        let err = compiler(OutputStyle::Expanded).compile(&entry).unwrap_err();
        assert_eq!(err.entry, entry);
        assert!(!err.detail().is_empty());
        assert!(err.to_string().contains("style.scss"));
    }

    #[test]
    fn test_missing_entry_is_compile_error() {
        let temp = TempDir::new().unwrap();
        let entry = temp.path().join("missing.scss");
        assert!(compiler(OutputStyle::Expanded).compile(&entry).is_err());
    }
}
