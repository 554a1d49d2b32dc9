mod aggregate;
mod cancel;
mod entry;
mod handle;
mod materialize;
mod options;
mod progress;
mod totals;
mod walker;

pub use aggregate::aggregate_totals;
pub use cancel::CancellationToken;
pub use entry::SizeEntry;
pub use handle::{
    resolve_root, scan_directory, start_scan, start_scan_with, ScanHandle, ScanResult,
};
pub use materialize::{materialize_root_children, MaterializeOutcome};
pub use options::{ScanOptions, LINUX_VIRTUAL_FS_PATHS};
pub use progress::{ProgressSink, ProgressSnapshot, ProgressTracker, MIN_ELAPSED_SECS};
pub use totals::DirectoryTotals;
pub use walker::{walk_directory, WalkOutcome, WalkStats};
