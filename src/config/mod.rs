//! Project configuration for `scsswatch.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [build], [purge], [watch]
//! ├── error          # ConfigError, ConfigDiagnostics
//! ├── util           # config discovery, pattern anchoring
//! └── mod.rs         # StyleConfig (this file)
//! ```
//!
//! The config file is optional. Without one, the defaults compile
//! `scss/style.scss` into `css/` and watch `scss/**/*.scss`, relative to
//! the current directory.

mod error;
pub mod section;
mod util;

pub use error::{ConfigDiagnostics, ConfigError};
pub use section::{BuildConfig, OutputStyle, PurgeConfig, WatchConfig};

use util::{absolute_pattern, find_config_file};

use crate::{cli::Cli, debug, log, utils::path::normalize_path};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file name looked up when `--config` is not given.
pub const DEFAULT_CONFIG_NAME: &str = "scsswatch.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing scsswatch.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root: parent of the config file, or cwd (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub purge: PurgeConfig,

    #[serde(default)]
    pub watch: WatchConfig,
}

impl StyleConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's parent directory, or cwd when running on defaults.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let config_path = find_config_file(&cli.config);
        if config_path.is_none() && cli.config != Path::new(DEFAULT_CONFIG_NAME) {
            bail!("config file '{}' not found", cli.config.display());
        }

        let mut config = match &config_path {
            Some(path) => Self::from_path(path)?,
            None => {
                debug!("config"; "no {} found, using defaults", DEFAULT_CONFIG_NAME);
                Self::default()
            }
        };

        let root = config_path
            .as_deref()
            .and_then(Path::parent)
            .map_or(cwd, Path::to_path_buf);

        config.config_path = config_path;
        config.finalize(&normalize_path(&root));
        config.apply_cli(cli);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} (ignored):", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Resolve every relative path against `root`.
    fn finalize(&mut self, root: &Path) {
        self.root = root.to_path_buf();

        self.build.entry = self.root_join(&self.build.entry);
        self.build.output = self.root_join(&self.build.output);
        self.build.load_paths = self
            .build
            .load_paths
            .iter()
            .map(|path| self.root_join(path))
            .collect();
    }

    /// Apply command-line overrides.
    fn apply_cli(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);
        Self::update_option(&mut self.purge.enable, cli.purge.as_ref());
    }

    fn update_option<T: Clone>(target: &mut T, value: Option<&T>) {
        if let Some(value) = value {
            *target = value.clone();
        }
    }

    /// Validate all sections, reporting every problem at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.build.validate(&mut diag);
        self.purge.validate(&mut diag);
        self.watch.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    // ========================================================================
    // path helpers
    // ========================================================================

    /// Join a relative path with the project root; absolute paths pass through.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        let path = path.strip_prefix(".").unwrap_or(path);
        self.root.join(path)
    }

    /// Display form of `path` relative to the project root.
    pub fn root_relative(&self, path: &Path) -> String {
        crate::utils::path::display_relative(path, &self.root)
    }

    /// Watch patterns anchored at the root.
    ///
    /// With purge enabled, the purge content patterns are watched as well.
    pub fn watch_patterns(&self) -> Vec<String> {
        let mut patterns: Vec<String> = self
            .watch
            .patterns
            .iter()
            .map(|p| absolute_pattern(&self.root, p))
            .collect();

        if self.purge.enable {
            for pattern in self.purge_patterns() {
                if !patterns.contains(&pattern) {
                    patterns.push(pattern);
                }
            }
        }

        patterns
    }

    /// Purge content patterns anchored at the root.
    pub fn purge_patterns(&self) -> Vec<String> {
        self.purge
            .content
            .iter()
            .map(|p| absolute_pattern(&self.root, p))
            .collect()
    }
}

/// Parse a config snippet, failing the test on unknown fields.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> StyleConfig {
    let (parsed, ignored) = StyleConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Config rooted at `root` with defaults, as `load` would produce.
#[cfg(test)]
pub fn test_config_at(root: &Path, content: &str) -> StyleConfig {
    let mut config = test_parse_config(content);
    config.finalize(root);
    config
}

// ============================================================================
// tests
// ============================================================================
