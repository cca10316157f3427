//! Small helpers shared by the pipeline and the watcher.

pub mod format;
pub mod path;
