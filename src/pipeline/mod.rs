//! Style pipeline: compile → (purge) → write, then watch.
//!
//! ```text
//! run_default
//!   ├── build_styles          once, to completion
//!   │     ├── compile         grass; errors are reported, never fatal
//!   │     ├── purge           lightningcss + tl (purge.enable only)
//!   │     └── write           <output>/<entry stem>.css
//!   └── watch_task(done)      arm watcher, call done()
//!         └── FileWatcher::run(build_styles)   until Ctrl+C
//! ```
//!
//! Only compile errors are handled here. Purge, write and watcher errors
//! propagate to the caller unchanged and end the process.

mod compile;
mod content;
mod purge;
mod selector;
mod write;

pub use compile::StyleCompiler;
pub use purge::{PurgeStats, Purged, RulePurger};
pub use write::write_css;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::StyleConfig;
use crate::logger::{status_detach, status_error, status_success};
use crate::utils::format::{human_size, plural_count};
use crate::watcher::{Change, FileWatcher, WatchPatterns};
use crate::{debug, log};

/// Which pipeline runs on every build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Straight compile.
    Compile,
    /// Compile, then drop rules unused by the purge content set.
    CompileAndPurge,
}

/// Result of one `build_styles` run.
#[derive(Debug)]
pub enum BuildOutcome {
    Written(BuildReport),
    /// The compiler rejected the entry; nothing was written.
    CompileFailed,
}

#[derive(Debug)]
pub struct BuildReport {
    pub output: PathBuf,
    pub bytes: usize,
    pub purged: Option<PurgeStats>,
}

pub struct Pipeline<'a> {
    config: &'a StyleConfig,
    compiler: StyleCompiler,
    purger: Option<RulePurger>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a StyleConfig) -> Self {
        let purger = config
            .purge
            .enable
            .then(|| RulePurger::from_config(config));

        Self {
            config,
            compiler: StyleCompiler::new(&config.build),
            purger,
        }
    }

    pub fn variant(&self) -> Variant {
        if self.purger.is_some() {
            Variant::CompileAndPurge
        } else {
            Variant::Compile
        }
    }

    /// Compile the entry, purge when enabled, write the result.
    ///
    /// A compile error is reported and yields `Ok(CompileFailed)` so watch
    /// mode survives bad edits. Purge and write errors are returned.
    pub fn build_styles(&self) -> Result<BuildOutcome> {
        let entry = &self.config.build.entry;
        debug!("sass"; "compiling {}", self.config.root_relative(entry));

        let css = match self.compiler.compile(entry) {
            Ok(css) => css,
            Err(err) => {
                status_error(
                    &format!("compile error in {}", self.config.root_relative(&err.entry)),
                    &err.detail(),
                );
                return Ok(BuildOutcome::CompileFailed);
            }
        };

        let (css, purged) = match &self.purger {
            Some(purger) => {
                let Purged { css, stats } = purger.purge(&css)?;
                (css, Some(stats))
            }
            None => (css, None),
        };

        let output = write_css(&self.config.build.output, entry, &css).with_context(|| {
            format!(
                "failed to write css to {}",
                self.config.build.output.display()
            )
        })?;

        let report = BuildReport {
            output,
            bytes: css.len(),
            purged,
        };
        status_success(&self.summary(&report));

        Ok(BuildOutcome::Written(report))
    }

    fn summary(&self, report: &BuildReport) -> String {
        let mut line = format!(
            "wrote {} ({})",
            self.config.root_relative(&report.output),
            human_size(report.bytes)
        );
        if let Some(stats) = report.purged {
            line.push_str(&format!(
                ", purged {} ({} kept)",
                plural_count(stats.removed, "selector"),
                stats.kept
            ));
        }
        line
    }

    /// Arm the watcher on the watch pattern set, then call `done`.
    ///
    /// Returns as soon as the watcher is attached; the first build is not
    /// awaited here. Arming failures are returned.
    pub fn watch_task<F: FnOnce()>(&self, done: F) -> Result<FileWatcher> {
        let patterns = WatchPatterns::new(&self.config.watch_patterns())
            .context("invalid watch pattern")?;
        let watcher = FileWatcher::new(patterns, self.config.watch.delay())
            .context("failed to start file watcher")?;
        done();
        Ok(watcher)
    }

    fn watch_summary(&self) -> String {
        self.config
            .watch_patterns()
            .iter()
            .map(|pattern| self.config.root_relative(Path::new(pattern)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Default task: build once, then rebuild on every watched change.
    pub fn run_default(&self) -> Result<()> {
        debug!("sass"; "pipeline: {:?}", self.variant());
        self.build_styles()?;

        let watcher = self.watch_task(|| {
            status_detach();
            log!("watch"; "watching {}", self.watch_summary());
        })?;

        watcher.run(|changes: &[Change]| {
            status_detach();
            for change in changes {
                log!("watch"; "{}: {}", change.kind.label(), self.config.root_relative(&change.path));
            }
            self.build_styles().map(drop)
        })
    }
}
