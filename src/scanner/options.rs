use std::path::Path;

use crate::config::ScannerConfig;

/// Configuration options for directory scanning operations.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Entries processed between cancellation checks inside one directory listing
    pub cancel_check_interval: usize,

    /// Do not descend into Linux virtual filesystems below the root
    pub skip_virtual_fs: bool,
}

/// Linux virtual filesystem paths that should be excluded by default.
/// These can report incorrect/huge sizes and cause scanning issues.
pub const LINUX_VIRTUAL_FS_PATHS: &[&str] = &["/proc", "/dev", "/sys", "/run"];

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            cancel_check_interval: 256,
            skip_virtual_fs: true,
        }
    }
}

impl From<&ScannerConfig> for ScanOptions {
    fn from(config: &ScannerConfig) -> Self {
        Self::new()
            .with_cancel_check_interval(config.cancel_check_interval)
            .with_skip_virtual_fs(config.skip_virtual_fs)
    }
}

impl ScanOptions {
    /// Check if a path lies in a Linux virtual filesystem.
    ///
    /// Compares whole components, so `/running` is not mistaken for `/run`.
    pub fn is_linux_virtual_fs(path: &Path) -> bool {
        LINUX_VIRTUAL_FS_PATHS
            .iter()
            .any(|vfs| path.starts_with(vfs))
    }

    /// Create a new ScanOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many entries are processed between cancellation checks (minimum 1)
    pub fn with_cancel_check_interval(mut self, interval: usize) -> Self {
        self.cancel_check_interval = interval.max(1);
        self
    }

    /// Set whether to skip Linux virtual filesystems
    pub fn with_skip_virtual_fs(mut self, skip: bool) -> Self {
        self.skip_virtual_fs = skip;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ScanOptions::default();
        assert_eq!(opts.cancel_check_interval, 256);
        assert!(opts.skip_virtual_fs);
    }

    #[test]
    fn test_scan_options_builder() {
        let opts = ScanOptions::new()
            .with_cancel_check_interval(8)
            .with_skip_virtual_fs(false);

        assert_eq!(opts.cancel_check_interval, 8);
        assert!(!opts.skip_virtual_fs);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let opts = ScanOptions::new().with_cancel_check_interval(0);
        assert_eq!(opts.cancel_check_interval, 1);
    }

    #[test]
    fn test_from_scanner_config() {
        let config = ScannerConfig {
            cancel_check_interval: 32,
            skip_virtual_fs: false,
        };
        let opts = ScanOptions::from(&config);
        assert_eq!(opts.cancel_check_interval, 32);
        assert!(!opts.skip_virtual_fs);
    }

    #[test]
    fn test_is_linux_virtual_fs() {
        // Should detect virtual filesystem paths
        assert!(ScanOptions::is_linux_virtual_fs(Path::new("/proc")));
        assert!(ScanOptions::is_linux_virtual_fs(Path::new("/proc/1/status")));
        assert!(ScanOptions::is_linux_virtual_fs(Path::new("/dev")));
        assert!(ScanOptions::is_linux_virtual_fs(Path::new("/sys/class/net")));
        assert!(ScanOptions::is_linux_virtual_fs(Path::new("/run/user/1000")));

        // Should not detect regular paths
        assert!(!ScanOptions::is_linux_virtual_fs(Path::new("/home/user")));
        assert!(!ScanOptions::is_linux_virtual_fs(Path::new("/tmp")));
        assert!(!ScanOptions::is_linux_virtual_fs(Path::new("/var/log")));
    }

    #[test]
    fn test_virtual_fs_uses_components_not_prefixes() {
        assert!(!ScanOptions::is_linux_virtual_fs(Path::new("/running")));
        assert!(!ScanOptions::is_linux_virtual_fs(Path::new("/devices")));
        assert!(!ScanOptions::is_linux_virtual_fs(Path::new("/system/bin")));
    }
}
