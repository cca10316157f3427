//! Configuration section definitions.

mod build;
mod purge;
mod watch;

pub use build::{BuildConfig, OutputStyle};
pub use purge::PurgeConfig;
pub use watch::WatchConfig;
