use std::path::PathBuf;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;

/// Tracks which watch roots are attached to the notify watcher.
///
/// Roots that do not exist yet (e.g. `html/` before the first page is
/// written) are attached as soon as they appear.
pub(super) struct WatchRoots {
    desired: Vec<PathBuf>,
    attached: FxHashSet<PathBuf>,
}

impl WatchRoots {
    pub(super) fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            desired: paths,
            attached: FxHashSet::default(),
        }
    }

    pub(super) fn attach_existing(
        &mut self,
        watcher: &mut RecommendedWatcher,
    ) -> notify::Result<()> {
        for path in &self.desired {
            if !path.is_dir() {
                crate::debug!("watch"; "root missing, will attach later: {}", path.display());
                continue;
            }
            watcher.watch(path, RecursiveMode::Recursive)?;
            self.attached.insert(path.clone());
        }

        Ok(())
    }

    /// Re-attach roots that appeared or were recreated.
    ///
    /// Returns `true` when every desired root is attached.
    pub(super) fn maintain(&mut self, watcher: &mut RecommendedWatcher) -> bool {
        self.attached.retain(|path| path.is_dir());

        for path in &self.desired {
            if self.attached.contains(path) || !path.is_dir() {
                continue;
            }

            if watcher.watch(path, RecursiveMode::Recursive).is_ok() {
                self.attached.insert(path.clone());
                crate::debug!("watch"; "attached watch: {}", path.display());
            }
        }

        self.all_attached()
    }

    pub(super) fn all_attached(&self) -> bool {
        self.attached.len() == self.desired.len()
    }
}
