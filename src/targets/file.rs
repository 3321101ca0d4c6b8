// src/targets/file.rs
// =============================================================================
// This module reads URLs from a file and merges them with the URLs given
// on the command line.
//
// File format:
// - One URL per line
// - Leading/trailing whitespace is ignored
// - Blank lines are skipped
//
// A missing or empty file is NOT fatal here: we print an error and the file
// simply contributes no URLs. main.rs decides what to do if the final list
// ends up empty.
//
// Rust concepts:
// - thiserror: Deriving our own error type
// - Iterators: trim/filter/map chains
// - Path and PathBuf: Borrowed and owned filesystem paths
// =============================================================================

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::checker::Target;

// Everything that can go wrong when reading the input file
//
// Each case is its own variant so callers (and tests) can tell them apart
#[derive(Debug, Error)]
pub enum InputFileError {
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("empty input file: {}", .0.display())]
    Empty(PathBuf),

    #[error("could not read input file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

// Reads a file and returns one Target per non-blank line
//
// Parameters:
//   path: the file to read
//
// Returns:
//   Ok(targets) with at least one entry, in file order
//   Err(NotFound) if the file doesn't exist
//   Err(Empty) if the file has no non-blank lines
//   Err(Unreadable) for any other I/O problem (e.g. path is a directory)
pub fn load_targets_from_file(path: &Path) -> Result<Vec<Target>, InputFileError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => InputFileError::NotFound(path.to_path_buf()),
        _ => InputFileError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let targets: Vec<Target> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Target::from)
        .collect();

    if targets.is_empty() {
        return Err(InputFileError::Empty(path.to_path_buf()));
    }

    debug!(path = %path.display(), count = targets.len(), "Loaded targets from file");
    Ok(targets)
}

// Merges command-line URLs and file URLs into the final target list
//
// Parameters:
//   urls: URLs given with -u/--urls (borrowed slice)
//   input_file: optional path given with -f/--input-file
//
// Returns: Vec<Target> - command-line URLs first, then file URLs
//
// File problems are reported on stderr and the file contributes nothing.
pub fn collect_targets(urls: &[String], input_file: Option<&Path>) -> Vec<Target> {
    let mut targets: Vec<Target> = urls
        .iter()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .map(Target::from)
        .collect();

    if let Some(path) = input_file {
        match load_targets_from_file(path) {
            Ok(from_file) => targets.extend(from_file),
            Err(e) => {
                warn!(error = %e, "Ignoring input file");
                match &e {
                    InputFileError::NotFound(_) => {
                        eprintln!("Error: input file not found 🤦‍♀️");
                    }
                    InputFileError::Empty(path) => {
                        eprintln!("Error: empty input file, {} 🤷‍♀️", path.display());
                    }
                    InputFileError::Unreadable { .. } => {
                        eprintln!("Error: {}", e);
                    }
                }
            }
        }
    }

    targets
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is thiserror?
//    - A derive macro that implements std::error::Error for our enum
//    - #[error("...")] becomes the Display message
//    - #[source] marks the underlying error so it shows up in error chains
//    - anyhow is for applications, thiserror is for "typed" errors like this
//
// 2. What does .lines() do?
//    - Splits a string on \n (and \r\n), without the line endings
//    - It's lazy: nothing happens until we .collect()
//
// 3. Why map_err?
//    - std::fs gives us an io::Error
//    - map_err converts it into OUR error type before ? returns it
//
// 4. Why &[String] instead of Vec<String>?
//    - A slice borrows the data, so the caller keeps ownership
//    - &Vec<String> automatically turns into &[String]
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn file_with(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn strings(targets: &[Target]) -> Vec<&str> {
        targets.iter().map(|t| t.as_str()).collect()
    }

    #[test]
    fn test_load_trims_and_skips_blank_lines() {
        let file = file_with("  python.org  \n\n\trust-lang.org\n   \n");
        let targets = load_targets_from_file(file.path()).unwrap();
        assert_eq!(strings(&targets), vec!["python.org", "rust-lang.org"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_targets_from_file(&dir.path().join("nope.txt"));
        assert!(matches!(result, Err(InputFileError::NotFound(_))));
    }

    #[test]
    fn test_load_empty_file() {
        let file = file_with("\n   \n\n");
        let result = load_targets_from_file(file.path());
        assert!(matches!(result, Err(InputFileError::Empty(_))));
    }

    #[test]
    fn test_load_directory_is_unreadable() {
        let dir = tempdir().unwrap();
        let result = load_targets_from_file(dir.path());
        assert!(matches!(result, Err(InputFileError::Unreadable { .. })));
    }

    #[test]
    fn test_collect_puts_command_line_urls_first() {
        let file = file_with("c.com\nd.com\n");
        let urls = vec!["a.com".to_string(), "b.com".to_string()];

        let targets = collect_targets(&urls, Some(file.path()));

        assert_eq!(strings(&targets), vec!["a.com", "b.com", "c.com", "d.com"]);
    }

    #[test]
    fn test_collect_keeps_duplicates() {
        let urls = vec!["a.com".to_string(), "a.com".to_string()];
        let targets = collect_targets(&urls, None);
        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn test_collect_with_missing_file_uses_only_urls() {
        let dir = tempdir().unwrap();
        let urls = vec!["a.com".to_string()];

        let targets = collect_targets(&urls, Some(&dir.path().join("missing.txt")));

        assert_eq!(strings(&targets), vec!["a.com"]);
    }

    #[test]
    fn test_collect_with_empty_file_and_no_urls_is_empty() {
        let file = file_with("");
        let targets = collect_targets(&[], Some(file.path()));
        assert!(targets.is_empty());
    }
}
