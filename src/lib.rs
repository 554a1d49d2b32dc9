//! spacemap - A Linux disk usage scanner that feeds size-proportional treemaps
//!
//! This crate provides functionality for:
//! - Walking a directory tree iteratively, tolerating unreadable entries
//! - Reporting live progress and cancelling scans from another thread
//! - Preparing per-child sizes as input for a treemap layout

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod report;
pub mod scanner;
pub mod signals;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SpacemapError};
pub use scanner::{start_scan, CancellationToken, ProgressTracker, ScanHandle, SizeEntry};
