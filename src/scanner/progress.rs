use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// Lower bound for elapsed time so throughput never divides by zero.
pub const MIN_ELAPSED_SECS: f64 = 0.001;

/// Receives one call per counted regular file.
pub trait ProgressSink: Send + Sync {
    fn add_file(&self, size: u64);
}

/// Point-in-time copy of the scan counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub bytes_seen: u64,
    pub files_seen: u64,
    pub elapsed_secs: f64,
}

impl ProgressSnapshot {
    /// Bytes counted per second since the tracker was created.
    pub fn bytes_per_sec(&self) -> f64 {
        self.bytes_seen as f64 / self.elapsed_secs
    }
}

#[derive(Debug, Default)]
struct Counters {
    bytes: u64,
    files: u64,
}

/// Thread-safe byte and file counters shared between the scanner and a poller.
///
/// Both counters live under one lock, so a snapshot never sees bytes without
/// the matching file count.
#[derive(Debug)]
pub struct ProgressTracker {
    counters: Mutex<Counters>,
    started: Instant,
}

impl ProgressTracker {
    /// Create a tracker; elapsed time is measured from this call.
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(Counters::default()),
            started: Instant::now(),
        }
    }

    /// Record one file of `size` bytes.
    pub fn add_file(&self, size: u64) {
        let mut counters = self.lock();
        counters.bytes = counters.bytes.saturating_add(size);
        counters.files += 1;
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let counters = self.lock();
        ProgressSnapshot {
            bytes_seen: counters.bytes,
            files_seen: counters.files,
            elapsed_secs: self.started.elapsed().as_secs_f64().max(MIN_ELAPSED_SECS),
        }
    }

    // Counters stay valid even if a holder panicked mid-update.
    fn lock(&self) -> MutexGuard<'_, Counters> {
        self.counters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ProgressTracker {
    fn add_file(&self, size: u64) {
        ProgressTracker::add_file(self, size);
    }
}
