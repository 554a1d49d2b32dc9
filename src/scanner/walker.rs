use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SpacemapError};

use super::cancel::CancellationToken;
use super::options::ScanOptions;
use super::progress::ProgressSink;
use super::totals::DirectoryTotals;

/// How a walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
    /// Every reachable directory was visited. Values are direct subtotals.
    Completed(DirectoryTotals),
    /// Cancellation was observed; partial totals were dropped.
    Cancelled,
}

/// Counters describing what a walk skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Directories popped from the stack, including unreadable ones
    pub dirs_visited: u64,
    /// Directories whose listing failed
    pub dirs_unreadable: u64,
    /// Single entries skipped because their type or metadata could not be read
    pub entries_skipped: u64,
    /// Symbolic links ignored
    pub symlinks_skipped: u64,
}

/// Walk every directory reachable from `root` without following symlinks.
///
/// Uses an explicit stack instead of recursion, so native stack use is
/// constant no matter how deep the tree is. Each regular file's size is added
/// to its directory's subtotal and reported to `progress` before the next
/// entry is read.
///
/// Failures below the root skip the affected entry or directory. Only a root
/// that cannot be listed is an error.
pub fn walk_directory(
    root: &Path,
    options: &ScanOptions,
    cancel: &CancellationToken,
    progress: &dyn ProgressSink,
) -> Result<WalkOutcome> {
    let check_every = options.cancel_check_interval.max(1);
    // A root inside /proc or friends was asked for explicitly.
    let skip_virtual = options.skip_virtual_fs && !ScanOptions::is_linux_virtual_fs(root);

    let mut totals = DirectoryTotals::new();
    let mut stats = WalkStats::default();
    let mut stack: Vec<PathBuf> = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        if cancel.is_cancelled() {
            tracing::debug!(?stats, "Walk cancelled between directories");
            return Ok(WalkOutcome::Cancelled);
        }

        stats.dirs_visited += 1;

        let read_dir = match fs::read_dir(&dir) {
            Ok(rd) => rd,
            Err(e) if dir == root => {
                return Err(SpacemapError::RootUnreadable {
                    path: dir,
                    source: e,
                });
            }
            Err(e) => {
                tracing::debug!(path = %dir.display(), error = %e, "Cannot list directory");
                stats.dirs_unreadable += 1;
                totals.record(dir, 0);
                continue;
            }
        };

        let mut subtotal: u64 = 0;

        for (idx, entry) in read_dir.enumerate() {
            if idx > 0 && idx % check_every == 0 && cancel.is_cancelled() {
                tracing::debug!(?stats, path = %dir.display(), "Walk cancelled inside directory");
                return Ok(WalkOutcome::Cancelled);
            }

            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::trace!(path = %dir.display(), error = %e, "Skipping unreadable entry");
                    stats.entries_skipped += 1;
                    continue;
                }
            };

            // file_type() does not follow symlinks
            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(e) => {
                    tracing::trace!(path = %entry.path().display(), error = %e, "Skipping entry");
                    stats.entries_skipped += 1;
                    continue;
                }
            };

            if file_type.is_symlink() {
                stats.symlinks_skipped += 1;
                continue;
            }

            if file_type.is_file() {
                match entry.metadata() {
                    Ok(metadata) => {
                        let size = metadata.len();
                        subtotal = subtotal.saturating_add(size);
                        progress.add_file(size);
                    }
                    Err(e) => {
                        tracing::trace!(path = %entry.path().display(), error = %e, "Skipping file");
                        stats.entries_skipped += 1;
                    }
                }
            } else if file_type.is_dir() {
                let path = entry.path();
                if skip_virtual && ScanOptions::is_linux_virtual_fs(&path) {
                    tracing::trace!(path = %path.display(), "Skipping virtual filesystem");
                    continue;
                }
                stack.push(path);
            }
        }

        totals.record(dir, subtotal);
    }

    if cancel.is_cancelled() {
        return Ok(WalkOutcome::Cancelled);
    }

    tracing::debug!(?stats, dirs = totals.len(), "Walk finished");
    Ok(WalkOutcome::Completed(totals))
}
