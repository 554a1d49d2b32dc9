use std::fs;
use std::path::Path;

use crate::error::{Result, SpacemapError};

use super::cancel::CancellationToken;
use super::entry::SizeEntry;
use super::totals::DirectoryTotals;

/// How materializing the root's children ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterializeOutcome {
    Completed(Vec<SizeEntry>),
    Cancelled,
}

/// One [`SizeEntry`] per direct child of `root`.
///
/// Files report their own size; directories report their aggregated total
/// from `aggregated`, or zero when the walk recorded nothing for them.
/// Symlinks and special files are left out, and entries that fail to stat
/// are skipped individually.
pub fn materialize_root_children(
    root: &Path,
    aggregated: &DirectoryTotals,
    cancel: &CancellationToken,
) -> Result<MaterializeOutcome> {
    let read_dir = fs::read_dir(root).map_err(|e| SpacemapError::RootUnreadable {
        path: root.to_path_buf(),
        source: e,
    })?;

    let mut children = Vec::new();

    for entry in read_dir {
        if cancel.is_cancelled() {
            return Ok(MaterializeOutcome::Cancelled);
        }

        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::trace!(path = %root.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(e) => {
                tracing::trace!(path = %entry.path().display(), error = %e, "Skipping entry");
                continue;
            }
        };

        if file_type.is_symlink() {
            continue;
        }

        let path = entry.path();
        if file_type.is_file() {
            match entry.metadata() {
                Ok(metadata) => children.push(SizeEntry::new(path, metadata.len())),
                Err(e) => {
                    tracing::trace!(path = %path.display(), error = %e, "Skipping file");
                }
            }
        } else if file_type.is_dir() {
            let size = aggregated.get(&path).unwrap_or(0);
            children.push(SizeEntry::new(path, size));
        }
    }

    Ok(MaterializeOutcome::Completed(children))
}
