use std::collections::hash_map::{self, HashMap};
use std::path::{Path, PathBuf};

/// Per-directory byte totals keyed by absolute directory path.
///
/// Fresh from the walker each value is a direct subtotal (files directly
/// inside that directory). After [`aggregate_totals`](super::aggregate_totals)
/// each value also includes every descendant directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryTotals {
    sizes: HashMap<PathBuf, u64>,
}

impl DirectoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `bytes` to `dir`, creating the entry if needed.
    pub fn record(&mut self, dir: PathBuf, bytes: u64) {
        let total = self.sizes.entry(dir).or_insert(0);
        *total = total.saturating_add(bytes);
    }

    pub fn get(&self, dir: &Path) -> Option<u64> {
        self.sizes.get(dir).copied()
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.sizes.contains_key(dir)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, PathBuf, u64> {
        self.sizes.iter()
    }

    /// Directory paths in unspecified order.
    pub fn dirs(&self) -> impl Iterator<Item = &Path> {
        self.sizes.keys().map(PathBuf::as_path)
    }
}

impl FromIterator<(PathBuf, u64)> for DirectoryTotals {
    fn from_iter<I: IntoIterator<Item = (PathBuf, u64)>>(iter: I) -> Self {
        let mut totals = Self::new();
        for (dir, bytes) in iter {
            totals.record(dir, bytes);
        }
        totals
    }
}

impl IntoIterator for DirectoryTotals {
    type Item = (PathBuf, u64);
    type IntoIter = hash_map::IntoIter<PathBuf, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.sizes.into_iter()
    }
}

impl<'a> IntoIterator for &'a DirectoryTotals {
    type Item = (&'a PathBuf, &'a u64);
    type IntoIter = hash_map::Iter<'a, PathBuf, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
