//! Turning scan results into treemap input and human/JSON output.

use humansize::{format_size, BINARY};
use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::scanner::{ProgressSnapshot, SizeEntry};

/// Name of the bucket that collects everything beyond the top entries.
pub const OTHER_LABEL: &str = "(Other)";

/// Prepare scan results for a rectangle-packing layout.
///
/// Zero-size entries are dropped and the rest sorted largest first (ties by
/// path). At most `max_items` entries are kept; anything beyond is summed
/// into one `<root>/(Other)` entry, so the output covers the full total.
pub fn prepare_treemap_input(
    entries: &[SizeEntry],
    root: &Path,
    max_items: usize,
) -> Vec<SizeEntry> {
    let mut items: Vec<SizeEntry> = entries.iter().filter(|e| e.size > 0).cloned().collect();
    items.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path().cmp(b.path())));

    let max_items = max_items.max(1);
    if items.len() > max_items {
        let other: u64 = items
            .drain(max_items..)
            .fold(0u64, |acc, e| acc.saturating_add(e.size));
        items.push(SizeEntry::new(root.join(OTHER_LABEL), other));
    }

    items
}

/// Sum of entry sizes.
pub fn total_size(entries: &[SizeEntry]) -> u64 {
    entries.iter().fold(0u64, |acc, e| acc.saturating_add(e.size))
}

/// One-line live status, e.g. `Scanning: 1204 files, 3.2 GiB counted, 410 MiB/s`.
pub fn status_line(snapshot: &ProgressSnapshot) -> String {
    format!(
        "Scanning: {} files, {} counted, {}/s",
        snapshot.files_seen,
        format_size(snapshot.bytes_seen, BINARY),
        format_size(snapshot.bytes_per_sec() as u64, BINARY)
    )
}

/// Format treemap items as a size table with each entry's share of the total.
pub fn format_table(items: &[SizeEntry]) -> String {
    let total = total_size(items);
    let mut output = String::new();

    output.push_str(&format!("{:>12}  {:>6}  {}\n", "SIZE", "SHARE", "NAME"));
    output.push_str(&format!("{:->12}  {:->6}  {:-<40}\n", "", "", ""));

    for item in items {
        let share = if total == 0 {
            0.0
        } else {
            item.size as f64 * 100.0 / total as f64
        };
        output.push_str(&format!(
            "{:>12}  {:>5.1}%  {}\n",
            format_size(item.size, BINARY),
            share,
            item.name()
        ));
    }

    output
}

/// JSON document for `--json` output.
#[derive(Debug, Serialize)]
pub struct ScanReport<'a> {
    pub root: &'a Path,
    pub total_size: u64,
    pub files_seen: u64,
    pub elapsed_secs: f64,
    pub entries: &'a [SizeEntry],
}

impl<'a> ScanReport<'a> {
    pub fn new(root: &'a Path, entries: &'a [SizeEntry], progress: &ProgressSnapshot) -> Self {
        Self {
            root,
            total_size: total_size(entries),
            files_seen: progress.files_seen,
            elapsed_secs: progress.elapsed_secs,
            entries,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}
