// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - Option<T>: For arguments the user may leave out
// =============================================================================

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
// --version prints "site-checker v<version from Cargo.toml>"
#[derive(Parser, Debug)]
#[command(
    name = "site-checker",
    version = concat!("v", env!("CARGO_PKG_VERSION")),
    disable_version_flag = true,
    about = "Check the availability of websites",
    long_about = "site-checker sends a lightweight HTTP HEAD request to every URL you give it \
                  (trying http:// first, then https://) and tells you whether each site is online."
)]
pub struct Cli {
    /// Show the application's version and exit
    ///
    /// clap's own flag is -V, so we declare -v/--version ourselves
    #[arg(short = 'v', long, action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// Enter one or more website URLs
    ///
    /// Example: site-checker -u python.org rust-lang.org
    /// num_args = 1.. lets one -u flag take several values
    #[arg(short, long, value_name = "URLs", num_args = 1..)]
    pub urls: Vec<String>,

    /// Read URLs from a file (one URL per line)
    #[arg(short = 'f', long, value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Run the connectivity checks concurrently
    ///
    /// Without this flag every URL is checked one after the other
    #[arg(short, long)]
    pub asynchronous: bool,

    /// Timeout in seconds for each HEAD request
    ///
    /// Can also be set with the SITE_CHECKER_TIMEOUT environment variable
    #[arg(short, long, value_name = "SECS", default_value_t = 2, env = "SITE_CHECKER_TIMEOUT")]
    pub timeout: u64,

    /// Maximum number of checks in flight at once with --asynchronous (0 = no limit)
    #[arg(
        short = 'c',
        long,
        value_name = "N",
        default_value_t = 50,
        env = "SITE_CHECKER_MAX_CONCURRENCY"
    )]
    pub max_concurrency: usize,
}

// How the checks should be executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One URL at a time, printing each result as soon as it arrives
    Sequential,
    /// All URLs at once, printing results (in input order) when all are done
    Concurrent,
}

// Settings the checker needs, pulled out of the raw CLI arguments
//
// Keeping this separate from `Cli` means the rest of the program never has
// to care whether a value came from a flag or an environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    pub mode: Mode,
    pub timeout: Duration,
    /// None = no limit on concurrent probes
    pub max_concurrency: Option<usize>,
}

impl Cli {
    // Builds the checker settings from the parsed flags
    pub fn checker_config(&self) -> CheckerConfig {
        CheckerConfig {
            mode: if self.asynchronous {
                Mode::Concurrent
            } else {
                Mode::Sequential
            },
            timeout: Duration::from_secs(self.timeout),
            max_concurrency: match self.max_concurrency {
                0 => None,
                n => Some(n),
            },
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Vec<String> for --urls?
//    - clap collects every value after -u into the Vec
//    - If the flag is never given, the Vec is simply empty
//    - That is why we don't need Option<Vec<String>>
//
// 2. What does env = "..." do?
//    - If the flag is missing, clap looks up that environment variable
//    - If both are missing, default_value_t is used
//    - Order: flag > environment variable > default
//
// 3. Why PathBuf instead of String for the file?
//    - PathBuf is the owned type for filesystem paths
//    - Paths are not always valid UTF-8 on every OS
//
// 4. What is Duration?
//    - std::time::Duration represents a span of time
//    - reqwest and tokio both take Duration for timeouts
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sequential_with_two_second_timeout() {
        let cli = Cli::try_parse_from(["site-checker", "-u", "example.com"]).unwrap();
        let config = cli.checker_config();

        assert_eq!(cli.urls, vec!["example.com"]);
        assert_eq!(config.mode, Mode::Sequential);
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.max_concurrency, Some(50));
    }

    #[test]
    fn test_multiple_urls_and_file() {
        let cli = Cli::try_parse_from([
            "site-checker",
            "-u",
            "a.com",
            "b.com",
            "-f",
            "sites.txt",
            "-a",
        ])
        .unwrap();

        assert_eq!(cli.urls, vec!["a.com", "b.com"]);
        assert_eq!(cli.input_file, Some(PathBuf::from("sites.txt")));
        assert_eq!(cli.checker_config().mode, Mode::Concurrent);
    }

    #[test]
    fn test_no_arguments_parses_to_empty_urls() {
        let cli = Cli::try_parse_from(["site-checker"]).unwrap();
        assert!(cli.urls.is_empty());
        assert!(cli.input_file.is_none());
    }

    #[test]
    fn test_short_v_prints_version() {
        let err = Cli::try_parse_from(["site-checker", "-v"]).unwrap_err();

        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        assert_eq!(
            err.to_string().trim(),
            format!("site-checker v{}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn test_huge_concurrency_is_accepted() {
        let cli = Cli::try_parse_from(["site-checker", "-a", "-c", "18446744073709551615"]).unwrap();
        assert_eq!(cli.checker_config().max_concurrency, Some(usize::MAX));
    }

    #[test]
    fn test_zero_concurrency_means_unbounded() {
        let cli = Cli::try_parse_from(["site-checker", "-a", "-c", "0", "-t", "5"]).unwrap();
        let config = cli.checker_config();
        assert_eq!(config.max_concurrency, None);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
