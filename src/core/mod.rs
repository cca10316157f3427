//! Core process state shared across the codebase.

mod state;

pub use state::{is_shutdown, register_watcher, setup_shutdown_handler};
