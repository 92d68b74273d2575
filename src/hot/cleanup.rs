//! Hot file removal on every process exit path.
//!
//! A stale hot file makes the next process believe a dev server is running
//! at a dead URL, so the marker is removed on normal exit (guard drop) and
//! on SIGINT, SIGTERM and SIGHUP (ctrlc `termination` feature). Whichever
//! path runs first does the work; later ones are no-ops.

use super::HotFile;
use crate::log;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Result of a cleanup attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// The hot file existed and was deleted.
    Removed,
    /// The hot file was already gone.
    Absent,
    /// Another exit path already ran the cleanup.
    AlreadyRan,
    /// Deletion failed (logged).
    Failed,
}

/// Removes the hot file at most once per process.
#[derive(Debug)]
pub struct MarkerCleanup {
    hot_file: HotFile,
    ran: AtomicBool,
}

impl MarkerCleanup {
    pub fn new(hot_file: HotFile) -> Arc<Self> {
        Arc::new(Self {
            hot_file,
            ran: AtomicBool::new(false),
        })
    }

    /// The hot file this cleanup removes.
    pub fn hot_file(&self) -> &HotFile {
        &self.hot_file
    }

    /// Remove the hot file unless an earlier exit path already did.
    ///
    /// Synchronous: returns only after the file is gone.
    pub fn run(&self) -> CleanupOutcome {
        if self.ran.swap(true, Ordering::SeqCst) {
            return CleanupOutcome::AlreadyRan;
        }

        match self.hot_file.remove() {
            Ok(true) => CleanupOutcome::Removed,
            Ok(false) => CleanupOutcome::Absent,
            Err(e) => {
                log!("hot"; "failed to remove {}: {}", self.hot_file.path().display(), e);
                CleanupOutcome::Failed
            }
        }
    }

    pub fn has_run(&self) -> bool {
        self.ran.load(Ordering::SeqCst)
    }
}

/// Runs the cleanup when dropped (normal return from the serve loop).
#[derive(Debug)]
pub struct MarkerGuard {
    cleanup: Arc<MarkerCleanup>,
}

impl MarkerGuard {
    pub fn new(cleanup: Arc<MarkerCleanup>) -> Self {
        Self { cleanup }
    }
}

impl Drop for MarkerGuard {
    fn drop(&mut self) {
        self.cleanup.run();
    }
}

/// Install the process signal handler (SIGINT, SIGTERM, SIGHUP).
///
/// The hot file is removed before `then` runs, so `then` may exit the
/// process. Can only be installed once per process.
pub fn install_signal_handler<F>(cleanup: Arc<MarkerCleanup>, then: F) -> Result<(), ctrlc::Error>
where
    F: Fn(CleanupOutcome) + Send + 'static,
{
    ctrlc::set_handler(move || then(cleanup.run()))
}
