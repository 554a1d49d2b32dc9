//! Running a complete scan, either inline or on a background thread.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::{Result, SpacemapError};

use super::aggregate::aggregate_totals;
use super::cancel::CancellationToken;
use super::entry::SizeEntry;
use super::materialize::{materialize_root_children, MaterializeOutcome};
use super::options::ScanOptions;
use super::progress::{ProgressSink, ProgressSnapshot, ProgressTracker};
use super::walker::{walk_directory, WalkOutcome};

/// Terminal value of a scan: the root's children, an empty list when the
/// scan was cancelled, or an error.
pub type ScanResult = Result<Vec<SizeEntry>>;

/// Canonicalize `root` and make sure it is a directory.
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    let resolved = root.canonicalize().map_err(|e| SpacemapError::io(root, e))?;
    let metadata = fs::metadata(&resolved).map_err(|e| SpacemapError::io(&resolved, e))?;
    if !metadata.is_dir() {
        return Err(SpacemapError::NotADirectory(resolved));
    }
    Ok(resolved)
}

/// Walk, aggregate and materialize `root` on the calling thread.
///
/// Returns an empty list if `cancel` is set at any point before the result is
/// built; partial totals are never returned.
pub fn scan_directory(
    root: &Path,
    options: &ScanOptions,
    cancel: &CancellationToken,
    progress: &dyn ProgressSink,
) -> ScanResult {
    let root = resolve_root(root)?;
    tracing::info!(root = %root.display(), "Scanning directory");

    let direct = match walk_directory(&root, options, cancel, progress)? {
        WalkOutcome::Completed(totals) => totals,
        WalkOutcome::Cancelled => {
            tracing::info!(root = %root.display(), "Scan cancelled");
            return Ok(Vec::new());
        }
    };

    let aggregated = aggregate_totals(direct, &root);

    match materialize_root_children(&root, &aggregated, cancel)? {
        MaterializeOutcome::Completed(entries) => {
            tracing::info!(
                root = %root.display(),
                entries = entries.len(),
                total = aggregated.get(&root).unwrap_or(0),
                "Scan complete"
            );
            Ok(entries)
        }
        MaterializeOutcome::Cancelled => {
            tracing::info!(root = %root.display(), "Scan cancelled");
            Ok(Vec::new())
        }
    }
}

/// Start scanning `root` on a background thread with a fresh tracker and token.
pub fn start_scan(root: impl Into<PathBuf>, options: ScanOptions) -> Result<ScanHandle> {
    start_scan_with(
        root,
        options,
        Arc::new(ProgressTracker::new()),
        CancellationToken::new(),
    )
}

/// Start scanning `root` on a background thread, reporting into `progress`
/// and observing `cancel`.
pub fn start_scan_with(
    root: impl Into<PathBuf>,
    options: ScanOptions,
    progress: Arc<ProgressTracker>,
    cancel: CancellationToken,
) -> Result<ScanHandle> {
    let root = root.into();
    // One slot: the scanner's single send never waits on the caller.
    let (tx, rx) = mpsc::sync_channel::<ScanResult>(1);

    let thread = {
        let root = root.clone();
        let progress = Arc::clone(&progress);
        let cancel = cancel.clone();

        thread::Builder::new()
            .name("spacemap-scanner".into())
            .spawn(move || {
                let result = scan_directory(&root, &options, &cancel, progress.as_ref());
                if let Err(ref e) = result {
                    tracing::warn!(root = %root.display(), error = %e, "Scan failed");
                }
                let _ = tx.try_send(result);
            })
            .map_err(SpacemapError::Spawn)?
    };

    Ok(ScanHandle {
        root,
        progress,
        cancel,
        result_rx: rx,
        thread: Some(thread),
        delivered: false,
    })
}

/// Handle to a scan running on a background thread.
///
/// Dropping the handle detaches the thread; call [`cancel`](Self::cancel)
/// first to stop it early.
pub struct ScanHandle {
    root: PathBuf,
    progress: Arc<ProgressTracker>,
    cancel: CancellationToken,
    result_rx: Receiver<ScanResult>,
    thread: Option<JoinHandle<()>>,
    delivered: bool,
}

impl ScanHandle {
    /// Root as passed to [`start_scan`].
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Request cancellation. Returns `true` only for the first request.
    pub fn cancel(&self) -> bool {
        self.cancel.cancel()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// A token that cancels this scan, for use from other threads.
    pub fn canceller(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Current counters; after completion these are the final values.
    pub fn progress(&self) -> ProgressSnapshot {
        self.progress.snapshot()
    }

    pub fn tracker(&self) -> Arc<ProgressTracker> {
        Arc::clone(&self.progress)
    }

    /// Take the result if the scan has finished, without blocking.
    ///
    /// Yields `Some` once; later calls return `None`.
    pub fn try_result(&mut self) -> Option<ScanResult> {
        if self.delivered {
            return None;
        }

        let result = match self.result_rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(SpacemapError::ScanAborted),
        };

        self.delivered = true;
        self.join();
        Some(result)
    }

    /// Block until the scan finishes and return its result.
    ///
    /// Returns [`SpacemapError::ScanAborted`] if the result was already taken
    /// by [`try_result`](Self::try_result).
    pub fn wait(mut self) -> ScanResult {
        if self.delivered {
            return Err(SpacemapError::ScanAborted);
        }

        let result = self
            .result_rx
            .recv()
            .unwrap_or(Err(SpacemapError::ScanAborted));
        self.delivered = true;
        self.join();
        result
    }

    fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!(root = %self.root.display(), "Scan thread panicked");
            }
        }
    }
}
