//! Scan command implementation

use anyhow::{Context, Result};
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::thread;
use std::time::{Duration, Instant};

use crate::cli::ScanArgs;
use crate::config::Config;
use crate::report::{format_table, prepare_treemap_input, status_line, total_size, ScanReport};
use crate::scanner::{resolve_root, start_scan, ScanOptions};
use crate::signals;

/// How a scan command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Completed,
    Cancelled,
}

impl ScanStatus {
    /// Process exit code: 130 mirrors a shell's SIGINT convention.
    pub fn exit_code(self) -> i32 {
        match self {
            ScanStatus::Completed => 0,
            ScanStatus::Cancelled => 130,
        }
    }
}

/// Why the poll loop asked the scanner to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CancelReason {
    Interrupted,
    TimedOut,
}

/// Run the scan command
pub fn run(args: ScanArgs, config: &Config, quiet: bool) -> Result<ScanStatus> {
    let root = resolve_root(&args.path)
        .with_context(|| format!("Cannot scan '{}'", args.path.display()))?;

    let options = ScanOptions::from(&config.scanner)
        .with_skip_virtual_fs(config.scanner.skip_virtual_fs && !args.include_virtual);
    let max_items = args.top.unwrap_or(config.report.max_items).max(1);
    let poll_interval = Duration::from_millis(config.report.poll_interval_ms);
    let deadline = args.timeout.map(|secs| Instant::now() + Duration::from_secs(secs));

    if let Err(e) = signals::install_interrupt_handler() {
        tracing::warn!(error = %e, "Ctrl-C will terminate instead of cancelling the scan");
    }

    let mut handle = start_scan(root, options)?;
    let spinner = (!quiet && !args.no_progress).then(new_spinner);
    let mut cancel_reason = None;

    let result = loop {
        if let Some(result) = handle.try_result() {
            break result;
        }

        if cancel_reason.is_none() {
            let reason = if signals::interrupted() {
                Some(CancelReason::Interrupted)
            } else if deadline.is_some_and(|d| Instant::now() >= d) {
                Some(CancelReason::TimedOut)
            } else {
                None
            };

            if let Some(reason) = reason {
                tracing::info!(?reason, "Cancelling scan");
                handle.cancel();
                cancel_reason = Some(reason);
            }
        }

        if let Some(pb) = &spinner {
            match cancel_reason {
                Some(_) => pb.set_message("Cancelling..."),
                None => pb.set_message(status_line(&handle.progress())),
            }
        }

        thread::sleep(poll_interval);
    };

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }

    let entries = result?;
    let progress = handle.progress();

    // A scan that finished before noticing the request still counts as done.
    if handle.is_cancelled() && entries.is_empty() {
        let why = match cancel_reason {
            Some(CancelReason::TimedOut) => "timed out",
            _ => "cancelled",
        };
        eprintln!(
            "Scan {} after {} files ({})",
            why,
            progress.files_seen,
            format_size(progress.bytes_seen, BINARY)
        );
        return Ok(ScanStatus::Cancelled);
    }

    let root = handle.root();
    let items = prepare_treemap_input(&entries, root, max_items);

    if args.json {
        println!("{}", ScanReport::new(root, &items, &progress).to_json(true)?);
        return Ok(ScanStatus::Completed);
    }

    if items.is_empty() {
        println!("Nothing to display (empty directory or insufficient permissions)");
    } else {
        print!("{}", format_table(&items));
    }

    println!();
    println!(
        "Total: {} in {} files, {} entries under {} ({:.2}s)",
        format_size(total_size(&entries), BINARY),
        progress.files_seen,
        entries.len(),
        root.display(),
        progress.elapsed_secs
    );

    Ok(ScanStatus::Completed)
}

fn new_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
