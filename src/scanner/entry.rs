use serde::Serialize;
use std::path::{Path, PathBuf};

/// Size of one direct child of the scan root: a file's own size or a
/// directory's aggregated total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeEntry {
    /// Full path to the file or directory
    pub path: PathBuf,

    /// Size in bytes
    pub size: u64,
}

impl SizeEntry {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// Last path component, or the whole path when there is none (e.g. "/").
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
