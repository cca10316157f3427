//! File watcher
//!
//! Watches the configured glob patterns and hands debounced batches of
//! changes to a rebuild handler. The watcher is armed before the handler
//! loop starts, so edits made while the caller is still busy are buffered.
//!
//! ```text
//! notify → bridge thread → pattern filter → Debouncer → handler(&[Change])
//! ```
//!
//! The handler runs inline on the loop, so a new batch is only taken after
//! the previous build finished. Changes arriving during a build are queued.

use std::time::Duration;

use anyhow::{Context, Result};
use notify::RecommendedWatcher;
use tokio::sync::mpsc;

// Pure timing and deduplication.
mod debouncer;
// Glob pattern set and its watch roots.
mod patterns;
// Shared change types.
mod types;
// Watch root attach/re-attach lifecycle.
mod watch_roots;


use debouncer::Debouncer;
pub use patterns::WatchPatterns;
pub use types::Change;
use watch_roots::WatchRoots;

/// Poll interval while some watch root does not exist yet.
const ROOT_POLL: Duration = Duration::from_secs(1);

/// Armed file watcher.
pub struct FileWatcher {
    /// Channel to receive notify events (sync side)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    watcher: RecommendedWatcher,
    watch_roots: WatchRoots,
    patterns: WatchPatterns,
    delay: Duration,
}

impl FileWatcher {
    /// Start watching every existing root of `patterns` immediately.
    ///
    /// Missing roots are attached once they appear.
    pub fn new(patterns: WatchPatterns, delay: Duration) -> notify::Result<Self> {
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        let mut watch_roots = WatchRoots::new(patterns.roots().to_vec());
        watch_roots.attach_existing(&mut watcher)?;

        Ok(Self {
            notify_rx,
            watcher,
            watch_roots,
            patterns,
            delay,
        })
    }

    /// Run the watch loop until Ctrl+C.
    ///
    /// Returns `Ok(())` on shutdown and the first handler error otherwise.
    pub fn run<F>(self, handler: F) -> Result<()>
    where
        F: FnMut(&[Change]) -> Result<()>,
    {
        let (shutdown_tx, shutdown_rx) = mpsc::unbounded_channel();
        crate::core::register_watcher(shutdown_tx);
        self.run_until(shutdown_rx, handler)
    }

    /// Run the watch loop until `shutdown` receives a message.
    fn run_until<F>(self, shutdown: mpsc::UnboundedReceiver<()>, mut handler: F) -> Result<()>
    where
        F: FnMut(&[Change]) -> Result<()>,
    {
        let Self {
            notify_rx,
            mut watcher,
            mut watch_roots,
            patterns,
            delay,
        } = self;

        let (event_tx, event_rx) = mpsc::channel::<notify::Event>(64);

        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if event_tx.blocking_send(event).is_err() {
                            break; // Receiver dropped
                        }
                    }
                    Err(e) => crate::log!("watch"; "notify error: {}", e),
                }
            }
        });

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start watch runtime")?;

        runtime.block_on(drive(
            event_rx,
            shutdown,
            &patterns,
            Debouncer::new(delay),
            || watch_roots.maintain(&mut watcher),
            &mut handler,
        ))
    }
}

/// Event loop shared by `FileWatcher::run` and tests.
///
/// `maintain` re-attaches watch roots and reports whether all of them are
/// attached; while any is missing the loop wakes up at least every
/// `ROOT_POLL`.
async fn drive<M, F>(
    mut events: mpsc::Receiver<notify::Event>,
    mut shutdown: mpsc::UnboundedReceiver<()>,
    patterns: &WatchPatterns,
    mut debouncer: Debouncer,
    mut maintain: M,
    handler: &mut F,
) -> Result<()>
where
    M: FnMut() -> bool,
    F: FnMut(&[Change]) -> Result<()>,
{
    let mut roots_ok = maintain();

    loop {
        if crate::core::is_shutdown() {
            return Ok(());
        }

        let sleep = if roots_ok {
            debouncer.sleep_duration()
        } else {
            debouncer.sleep_duration().min(ROOT_POLL)
        };

        tokio::select! {
            biased;
            Some(()) = shutdown.recv() => return Ok(()),
            Some(event) = events.recv() => {
                if let Some(event) = patterns.filter_event(event) {
                    debouncer.add_event(&event);
                }
            }
            _ = tokio::time::sleep(sleep) => {
                roots_ok = maintain();
                if let Some(changes) = debouncer.take_if_ready() {
                    handler(&changes)?;
                }
            }
        }
    }
}
