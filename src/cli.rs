use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// spacemap - Find what is eating your disk, ready for a treemap
#[derive(Parser, Debug)]
#[command(name = "spacemap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Measure disk usage of a directory's children
    Scan(ScanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory to analyze
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Show top N entries by size; the rest are grouped as "(Other)"
    #[arg(short = 'n', long, value_name = "N")]
    pub top: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Cancel the scan after this many seconds
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Also descend into /proc, /sys, /dev and /run
    #[arg(long)]
    pub include_virtual: bool,

    /// Do not draw the live progress spinner
    #[arg(long)]
    pub no_progress: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Validates the CLI definition is correct
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_scan_command() {
        let cli = Cli::parse_from(["spacemap", "scan", "/home"]);
        match cli.command {
            Command::Scan(args) => {
                assert_eq!(args.path, PathBuf::from("/home"));
                assert_eq!(args.top, None);
                assert!(!args.json);
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn parse_scan_with_options() {
        let cli = Cli::parse_from([
            "spacemap",
            "scan",
            "--json",
            "-n",
            "10",
            "--timeout",
            "30",
            "--include-virtual",
            "/data",
        ]);
        match cli.command {
            Command::Scan(args) => {
                assert!(args.json);
                assert_eq!(args.top, Some(10));
                assert_eq!(args.timeout, Some(30));
                assert!(args.include_virtual);
                assert_eq!(args.path, PathBuf::from("/data"));
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn scan_defaults_to_current_directory() {
        let cli = Cli::parse_from(["spacemap", "scan"]);
        match cli.command {
            Command::Scan(args) => assert_eq!(args.path, PathBuf::from(".")),
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn global_verbose_flag() {
        let cli = Cli::parse_from(["spacemap", "-vvv", "scan"]);
        assert_eq!(cli.verbose, 3);
    }
}
