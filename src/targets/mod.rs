// src/targets/mod.rs
// =============================================================================
// This module builds the list of URLs ("targets") we are going to check.
//
// URLs can come from two places:
// - Directly on the command line (-u/--urls)
// - A text file with one URL per line (-f/--input-file)
//
// Both sources are merged into one ordered list: command-line URLs first,
// then the file's URLs in the order they appear in the file.
//
// Rust concepts:
// - Modules: Organizing related functionality
// - Public API: What other parts of the app can use
// =============================================================================

mod file;

pub use file::collect_targets;
